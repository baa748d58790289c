//! State Module - Upstream page state.
//!
//! Builders for the sources a table of contents is mounted against:
//!
//! - **Media** - Breakpoint matching from the viewport width
//! - **Main area** - Visible part of the main content column

mod main_area;
mod media;

pub use main_area::*;
pub use media::*;
