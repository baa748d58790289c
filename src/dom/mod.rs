//! Page model - Element arena, layout and painted state.
//!
//! Elements are NOT objects. They are indices into parallel arrays, the same
//! way the sidebar and the links of a rendered documentation page would be
//! addressed by a host:
//!
//! ```text
//! Index 0: nav  (parent=None, id="toc",      offset_top=120)
//! Index 1: a    (parent=0,    class=md-nav__link, href="#intro")
//! Index 2: h2   (parent=None, id="intro",    offset_top=400)
//! ```
//!
//! - [`registry`] - Index allocation, tree structure, attributes
//! - [`arrays`] - Layout offsets and painted state (reactive slots)
//! - [`query`] - Selector parsing and element lookup

pub mod arrays;
mod query;
mod registry;

pub use query::*;
pub use registry::*;
