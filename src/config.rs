//! Table of contents configuration.
//!
//! ```toml
//! link_selector = ".md-nav__link"
//! tablet_min_width = 960.0
//! anchor_offset = 18.0
//! ```
//!
//! Missing keys fall back to [`TocConfig::default`].

use std::path::Path;

use serde::Deserialize;

use crate::dom::Selector;
use crate::error::TocError;

/// Default selector for table of contents links.
pub const DEFAULT_LINK_SELECTOR: &str = ".md-nav__link";

/// Default tablet breakpoint (CSS pixels).
pub const DEFAULT_TABLET_MIN_WIDTH: f32 = 960.0;

/// Default distance kept between the header and an active section heading.
pub const DEFAULT_ANCHOR_OFFSET: f32 = 18.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Selector matching the links inside the mounted element.
    pub link_selector: String,
    /// Viewport width at or above which the sidebar and scroll spy run.
    pub tablet_min_width: f32,
    /// Added to the header height when deciding which section is read.
    pub anchor_offset: f32,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            link_selector: DEFAULT_LINK_SELECTOR.to_string(),
            tablet_min_width: DEFAULT_TABLET_MIN_WIDTH,
            anchor_offset: DEFAULT_ANCHOR_OFFSET,
        }
    }
}

impl TocConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, TocError> {
        let config: TocConfig = toml::from_str(content)?;
        config.selector()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TocError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TocError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(?path, selector = %config.link_selector, "Loaded toc config");
        Ok(config)
    }

    /// Parsed link selector.
    pub fn selector(&self) -> Result<Selector, TocError> {
        Selector::parse(&self.link_selector)
    }
}
