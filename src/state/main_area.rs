//! Main area - Visible part of the main content column.
//!
//! The visible height is the viewport height minus whatever the header
//! (or the space above the column) covers at the top and whatever lies
//! beyond the end of the column at the bottom.

use std::rc::Rc;

use spark_signals::derived;

use crate::dom::arrays::{get_offset_height, get_offset_top};
use crate::types::{ElementId, Header, Main, Source, Viewport};

/// Compute main area state for one header/viewport pair.
///
/// `top` and `bottom` are the column's edges in page coordinates.
pub fn compute_main(header: &Header, viewport: &Viewport, top: f32, bottom: f32) -> Main {
    let y = viewport.offset.y;
    let covered_top = (top - y).max(header.height).max(0.0);
    let covered_bottom = (viewport.size.height + y - bottom).max(0.0);
    Main {
        offset: top - header.height,
        height: (viewport.size.height - covered_top - covered_bottom).max(0.0),
        active: top - header.height <= y,
    }
}

/// Watch the main column `el`.
///
/// Re-computes on header, viewport and column layout changes.
pub fn watch_main(el: ElementId, header: Source<Header>, viewport: Source<Viewport>) -> Source<Main> {
    let main = derived(move || {
        let top = get_offset_top(el);
        let bottom = top + get_offset_height(el);
        compute_main(&header.get(), &viewport.get(), top, bottom)
    });
    Source::Getter(Rc::new(move || main.get()))
}
