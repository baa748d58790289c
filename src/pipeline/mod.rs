//! Reactive Pipeline
//!
//! This module implements the table of contents pipeline that connects the
//! page geometry signals to the painted sidebar and links.
//!
//! # Pipeline Architecture
//!
//! ```text
//! element + tablet → breakpoint gate ─┬─ BelowTablet
//!                                     └─ sidebar effect ─┐
//!                                        anchors effect ─┴→ latest join → shared replay
//! ```
//!
//! ## Key Design Principles
//!
//! - **One scope per variant**: every activation owns an EffectScope; a
//!   switch stops the outgoing scope before the incoming one is built
//! - **Painters are passthroughs**: they mutate page state and hand the value
//!   on unchanged
//! - **Reactive Dependencies**: reads from signals/slots inside effects
//!   auto-track dependencies; structure queries never do

pub mod anchors;
pub mod combine;
pub mod mount;
pub mod shared;
pub mod sidebar;

// Re-exports
pub use anchors::{paint_anchor_list, watch_anchor_list};
pub use combine::LatestPair;
pub use mount::{
    DomBackend, MountOptions, TableOfContents, TocBackend, mount_table_of_contents,
    mount_table_of_contents_with,
};
pub use shared::{SharedReplay, Subscription};
pub use sidebar::{paint_sidebar, watch_sidebar};

use crate::types::Painter;

/// Build a painter stage: apply the side effect, return the input unchanged.
pub fn passthrough<T: 'static>(apply: impl Fn(&T) + 'static) -> Painter<T> {
    Box::new(move |value| {
        apply(&value);
        value
    })
}
