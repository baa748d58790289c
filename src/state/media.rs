//! Media queries - Breakpoints derived from the viewport.

use std::rc::Rc;

use spark_signals::derived;

use crate::config::TocConfig;
use crate::types::{Source, Viewport};

/// Source that is true while the viewport is at least `min_width` wide.
///
/// Backed by a derived, so readers only re-run when the match flips.
pub fn watch_media(viewport: Source<Viewport>, min_width: f32) -> Source<bool> {
    let matches = derived(move || viewport.get().size.width >= min_width);
    Source::Getter(Rc::new(move || matches.get()))
}

/// Tablet breakpoint from configuration.
pub fn watch_tablet(viewport: Source<Viewport>, config: &TocConfig) -> Source<bool> {
    watch_media(viewport, config.tablet_min_width)
}
