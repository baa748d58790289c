//! Mount API - Table of contents lifecycle.
//!
//! This module provides the entry point for mounting a table of contents.
//! It sets up the breakpoint gate that switches between the two variants:
//!
//! - **BelowTablet**: nothing is derived, a single empty state is emitted
//! - **AboveTablet**: sidebar and scroll spy run and their latest values are
//!   joined into one state
//!
//! # Example
//!
//! ```ignore
//! use spark_signals::signal;
//! use spark_toc::{mount_table_of_contents, MountOptions, TocConfig};
//!
//! let element = signal(Some(toc_index));
//! let toc = mount_table_of_contents(element.clone(), options, &TocConfig::default())?;
//!
//! let sub = toc.subscribe(|state| println!("{state:?}"));
//!
//! // Remount on a new page
//! element.set(Some(next_toc_index));
//!
//! // Clean up
//! toc.unmount();
//! ```
//!
//! # Pattern: One EffectScope per variant
//!
//! The gate is an effect over a derived `(element, tablet)` pair, so inputs
//! that re-evaluate without changing the pair never re-run it. Each time the
//! pair changes,
//! the outgoing variant's scope is stopped first (effects disposed, painters
//! reset) and only then the incoming variant is built. Two variants are never
//! alive at the same time.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, derived, effect, effect_scope, on_scope_dispose};

use crate::config::TocConfig;
use crate::dom::{Selector, get_elements};
use crate::error::TocError;
use crate::types::{
    AnchorList, Cleanup, ElementId, Header, Main, Painter, Sidebar, Sink, Source,
    TableOfContentsState, Viewport,
};

use super::anchors::{paint_anchor_list, watch_anchor_list};
use super::combine::LatestPair;
use super::shared::{SharedReplay, Subscription};
use super::sidebar::{paint_sidebar, watch_sidebar};

// =============================================================================
// Mount Options
// =============================================================================

/// Page state the table of contents is mounted against.
#[derive(Clone)]
pub struct MountOptions {
    /// Sticky header.
    pub header: Source<Header>,
    /// Main content area.
    pub main: Source<Main>,
    /// Window scroll offset and size.
    pub viewport: Source<Viewport>,
    /// Viewport is at or above the tablet breakpoint.
    pub tablet: Source<bool>,
}

// =============================================================================
// Backend
// =============================================================================

/// Collaborators the gate delegates to.
///
/// Every method is called inside the scope of one activation: effects they
/// create and dispose hooks they register are torn down with it.
pub trait TocBackend: 'static {
    /// Links under `root`. Queried once per activation.
    fn get_elements(&self, root: ElementId) -> Vec<ElementId>;

    /// Forward sidebar geometry for `el` to `sink` until the scope ends.
    fn watch_sidebar(
        &self,
        el: ElementId,
        main: &Source<Main>,
        viewport: &Source<Viewport>,
        sink: Sink<Sidebar>,
    );

    /// Painter for sidebar geometry. Resets `el` when the scope ends.
    fn paint_sidebar(&self, el: ElementId) -> Painter<Sidebar>;

    /// Forward scroll spy changes over `els` to `sink` until the scope ends.
    fn watch_anchor_list(
        &self,
        els: &[ElementId],
        header: &Source<Header>,
        viewport: &Source<Viewport>,
        sink: Sink<AnchorList>,
    );

    /// Painter for link state. Resets every link in `els` when the scope ends.
    fn paint_anchor_list(&self, els: &[ElementId]) -> Painter<AnchorList>;
}

/// Backend over the in-memory page model.
#[derive(Debug, Clone)]
pub struct DomBackend {
    selector: Selector,
    anchor_offset: f32,
}

impl DomBackend {
    /// Backend using the configured link selector and anchor offset.
    ///
    /// Fails when the selector does not parse.
    pub fn new(config: &TocConfig) -> Result<Self, TocError> {
        Ok(Self {
            selector: config.selector()?,
            anchor_offset: config.anchor_offset,
        })
    }
}

impl TocBackend for DomBackend {
    fn get_elements(&self, root: ElementId) -> Vec<ElementId> {
        get_elements(&self.selector, root)
    }

    fn watch_sidebar(
        &self,
        el: ElementId,
        main: &Source<Main>,
        viewport: &Source<Viewport>,
        sink: Sink<Sidebar>,
    ) {
        watch_sidebar(el, main, viewport, sink);
    }

    fn paint_sidebar(&self, el: ElementId) -> Painter<Sidebar> {
        paint_sidebar(el)
    }

    fn watch_anchor_list(
        &self,
        els: &[ElementId],
        header: &Source<Header>,
        viewport: &Source<Viewport>,
        sink: Sink<AnchorList>,
    ) {
        watch_anchor_list(els, header, viewport, self.anchor_offset, sink);
    }

    fn paint_anchor_list(&self, els: &[ElementId]) -> Painter<AnchorList> {
        paint_anchor_list(els)
    }
}

// =============================================================================
// Table of Contents Handle
// =============================================================================

/// Handle returned by mount.
///
/// One shared execution backs every subscriber; new subscribers receive the
/// latest state immediately. Dropping the handle unmounts.
pub struct TableOfContents {
    shared: SharedReplay<TableOfContentsState>,
}

impl TableOfContents {
    /// Observe states. The first subscription starts the pipeline.
    pub fn subscribe(
        &self,
        observer: impl Fn(&TableOfContentsState) + 'static,
    ) -> Subscription<TableOfContentsState> {
        self.shared.subscribe(observer)
    }

    /// Latest emitted state.
    pub fn latest(&self) -> Option<TableOfContentsState> {
        self.shared.latest()
    }

    /// Pipeline is running.
    pub fn is_connected(&self) -> bool {
        self.shared.is_connected()
    }

    /// Tear down the current variant and drop all subscribers.
    pub fn unmount(self) {
        self.shared.stop();
    }
}

impl Drop for TableOfContents {
    fn drop(&mut self) {
        self.shared.stop();
    }
}

// =============================================================================
// Mount Functions
// =============================================================================

/// Mount a table of contents against the page model.
///
/// `element` holds the root currently mounted (`None` = nothing mounted).
/// Fails when the configured link selector is invalid.
pub fn mount_table_of_contents(
    element: Signal<Option<ElementId>>,
    options: MountOptions,
    config: &TocConfig,
) -> Result<TableOfContents, TocError> {
    let backend = DomBackend::new(config)
        .inspect_err(|err| tracing::warn!(%err, "Cannot mount table of contents"))?;
    Ok(mount_table_of_contents_with(element, options, backend))
}

/// Mount a table of contents with custom collaborators.
pub fn mount_table_of_contents_with<B: TocBackend>(
    element: Signal<Option<ElementId>>,
    options: MountOptions,
    backend: B,
) -> TableOfContents {
    let backend = Rc::new(backend);
    let shared = SharedReplay::new(move |emit| breakpoint_gate(element, options, backend, emit));
    TableOfContents { shared }
}

/// Switch between variants whenever the element or the breakpoint changes.
fn breakpoint_gate<B: TocBackend>(
    element: Signal<Option<ElementId>>,
    options: MountOptions,
    backend: Rc<B>,
    emit: Sink<TableOfContentsState>,
) -> Cleanup {
    let current: Rc<RefCell<Option<Cleanup>>> = Rc::new(RefCell::new(None));
    let mounted: Rc<Cell<Option<(Option<ElementId>, bool)>>> = Rc::new(Cell::new(None));

    let scope = effect_scope();

    let current_for_update = current.clone();
    let current_for_dispose = current;

    scope.run(move || {
        // Effects created by the gate belong to it and die when it re-runs.
        // Re-run only on a real change of the pair.
        let tablet_source = options.tablet.clone();
        let key = derived(move || (element.get(), tablet_source.get()));

        let _effect_cleanup = effect(move || {
            let (root, tablet) = key.get();

            // Skip if neither the element nor the breakpoint changed
            if mounted.get() == Some((root, tablet)) {
                return;
            }
            mounted.set(Some((root, tablet)));

            // Teardown before activation
            let previous = current_for_update.borrow_mut().take();
            if let Some(teardown) = previous {
                tracing::debug!("Tearing down table of contents variant");
                teardown();
            }

            let Some(root) = root else {
                tracing::debug!("Table of contents unmounted");
                return;
            };

            let next = if tablet {
                tracing::debug!(root, "Mounting table of contents above tablet breakpoint");
                Some(activate_above_tablet(root, &options, &backend, emit.clone()))
            } else {
                tracing::debug!(root, "Mounting table of contents below tablet breakpoint");
                emit(TableOfContentsState::BelowTablet);
                None
            };

            *current_for_update.borrow_mut() = next;
        });

        // Teardown the live variant when the gate is disposed
        on_scope_dispose(move || {
            let live = current_for_dispose.borrow_mut().take();
            if let Some(teardown) = live {
                teardown();
            }
        });
    });

    Box::new(move || {
        scope.stop();
    })
}

/// Build the sidebar + scroll spy pipeline for one root.
fn activate_above_tablet<B: TocBackend>(
    root: ElementId,
    options: &MountOptions,
    backend: &Rc<B>,
    emit: Sink<TableOfContentsState>,
) -> Cleanup {
    let scope = effect_scope();
    let options = options.clone();
    let backend = backend.clone();

    scope.run(move || {
        let els = backend.get_elements(root);
        tracing::trace!(root, links = els.len(), "Collected table of contents links");

        let join = LatestPair::new(move |sidebar, anchors| {
            emit(TableOfContentsState::AboveTablet { sidebar, anchors });
        });
        let join_for_dispose = join.clone();
        on_scope_dispose(move || join_for_dispose.close());

        let paint = backend.paint_sidebar(root);
        let join_sidebar = join.clone();
        backend.watch_sidebar(
            root,
            &options.main,
            &options.viewport,
            Rc::new(move |sidebar: Sidebar| join_sidebar.set_left(paint(sidebar))),
        );

        let paint = backend.paint_anchor_list(&els);
        let join_anchors = join;
        backend.watch_anchor_list(
            &els,
            &options.header,
            &options.viewport,
            Rc::new(move |anchors: AnchorList| join_anchors.set_right(paint(anchors))),
        );
    });

    Box::new(move || {
        scope.stop();
    })
}
