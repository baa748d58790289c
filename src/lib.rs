//! # spark-toc
//!
//! Reactive table of contents for documentation pages.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A mounted table of contents switches behavior at the tablet breakpoint.
//! Below it nothing is derived. Above it two effects run side by side: a
//! sticky sidebar derived from the main area and the viewport, and a scroll
//! spy derived from the header and the viewport. Their latest values are
//! joined into one state that is shared by every subscriber:
//!
//! ```text
//! (element, tablet) → breakpoint gate → [sidebar ∥ scroll spy] → latest join → shared replay
//! ```
//!
//! Page elements are indices into parallel arrays, like spark-tui
//! components. Painters write sidebar height, lock and link flags into those
//! arrays; a host renders them.
//!
//! ## Modules
//!
//! - [`types`] - Geometry inputs, derived states, `Source`
//! - [`dom`] - Element arena, layout offsets, painted state, queries
//! - [`pipeline`] - Breakpoint gate, sidebar, scroll spy, join, shared replay
//! - [`state`] - Media and main area sources
//! - [`config`] - `TocConfig` (TOML)

pub mod config;
pub mod dom;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::TocConfig;
pub use error::TocError;

pub use dom::{
    ElementProps, Selector, create_element, get_element_by_id, get_elements, release_element,
    reset_document,
};

pub use pipeline::{
    DomBackend, MountOptions, SharedReplay, Subscription, TableOfContents, TocBackend,
    mount_table_of_contents, mount_table_of_contents_with, paint_anchor_list, paint_sidebar,
    passthrough, watch_anchor_list, watch_sidebar,
};

pub use state::{watch_main, watch_media, watch_tablet};
