//! Sticky sidebar - Height and lock derived from main area and viewport.
//!
//! The sidebar sits inside the main area. While the page scrolls past the
//! top of the main area the sidebar grows by the scrolled distance (up to
//! the distance between the sidebar and its container) and locks to the
//! viewport once that distance is passed.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{effect, on_scope_dispose};

use crate::dom::arrays::{peek_offset_top, reset_sidebar_height, set_sidebar_height, set_sidebar_lock};
use crate::dom::get_parent;
use crate::types::{ElementId, Main, Painter, Sidebar, Sink, Source, Viewport};

use super::passthrough;

/// Distance between the sidebar's parent and its container.
///
/// Read once, without tracking. 0 when either ancestor is missing.
pub fn sidebar_adjust(el: ElementId) -> f32 {
    let Some(parent) = get_parent(el) else { return 0.0 };
    let Some(container) = get_parent(parent) else { return 0.0 };
    peek_offset_top(parent) - peek_offset_top(container)
}

/// Compute sidebar geometry for one main/viewport pair.
pub fn compute_sidebar(main: &Main, viewport: &Viewport, adjust: f32) -> Sidebar {
    let y = viewport.offset.y;
    let height = main.height + adjust.min((y - main.offset).max(0.0)) - adjust;
    Sidebar {
        height,
        lock: y >= main.offset + adjust,
    }
}

/// Watch sidebar geometry.
///
/// Creates an effect in the current scope that re-computes on every main or
/// viewport change and forwards distinct values to `sink`.
pub fn watch_sidebar(
    el: ElementId,
    main: &Source<Main>,
    viewport: &Source<Viewport>,
    sink: Sink<Sidebar>,
) {
    let adjust = sidebar_adjust(el);
    let main = main.clone();
    let viewport = viewport.clone();
    let last: Rc<Cell<Option<Sidebar>>> = Rc::new(Cell::new(None));

    tracing::trace!(el, adjust, "Watching sidebar");
    let _effect_cleanup = effect(move || {
        let sidebar = compute_sidebar(&main.get(), &viewport.get(), adjust);
        if last.get() == Some(sidebar) {
            return;
        }
        last.set(Some(sidebar));
        sink(sidebar);
    });
}

/// Paint sidebar geometry onto `el`.
///
/// Must be called inside an effect scope: height and lock are reset when
/// the scope is disposed.
pub fn paint_sidebar(el: ElementId) -> Painter<Sidebar> {
    on_scope_dispose(move || {
        tracing::trace!(el, "Resetting sidebar");
        reset_sidebar_height(el);
        set_sidebar_lock(el, false);
    });

    passthrough(move |sidebar: &Sidebar| {
        set_sidebar_height(el, sidebar.height);
        set_sidebar_lock(el, sidebar.lock);
    })
}
