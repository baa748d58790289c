//! Element queries - Selector parsing and lookup.
//!
//! Supports one compound selector: an optional tag name, an optional `#id`
//! and any number of `.class` parts (`.md-nav__link`, `a.md-nav__link`).
//! Combinators, attribute selectors and pseudo classes are rejected.

use std::borrow::Cow;

use crate::error::TocError;
use crate::types::ElementId;

use super::registry::{get_children, get_element_by_id, get_href, get_id, get_tag, has_class};

/// Parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, TocError> {
        let invalid = |reason: &str| TocError::Selector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let source = input.trim();
        if source.is_empty() {
            return Err(invalid("empty selector"));
        }

        let mut selector = Selector::default();
        let mut rest = source;

        let tag_len = rest.find(['.', '#']).unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !is_ident(tag) {
                return Err(invalid("unsupported tag name"));
            }
            selector.tag = Some(tag.to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..len];
            if !is_ident(name) {
                return Err(invalid("expected a name after '.' or '#'"));
            }
            match marker {
                '.' => selector.classes.push(name.to_string()),
                '#' if selector.id.is_none() => selector.id = Some(name.to_string()),
                _ => return Err(invalid("more than one id")),
            }
            rest = &body[len..];
        }

        Ok(selector)
    }

    /// Check whether an element matches.
    pub fn matches(&self, index: ElementId) -> bool {
        if let Some(tag) = &self.tag {
            if get_tag(index).as_deref() != Some(tag.as_str()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if get_id(index).as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| has_class(index, class))
    }
}

fn is_ident(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Descendants of `root` matching `selector`, in document order.
///
/// The root itself is never included. An empty result is valid.
pub fn get_elements(selector: &Selector, root: ElementId) -> Vec<ElementId> {
    let mut found = Vec::new();
    let mut stack: Vec<ElementId> = get_children(root).into_iter().rev().collect();
    while let Some(index) = stack.pop() {
        if selector.matches(index) {
            found.push(index);
        }
        stack.extend(get_children(index).into_iter().rev());
    }
    found
}

/// Element a link's `#fragment` points at.
pub fn get_link_target(link: ElementId) -> Option<ElementId> {
    let href = get_href(link)?;
    let (_, fragment) = href.split_once('#')?;
    get_element_by_id(&decode_fragment(fragment))
}

/// Percent-decode a URL fragment. Undecodable fragments are kept verbatim.
fn decode_fragment(fragment: &str) -> String {
    urlencoding::decode(fragment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| fragment.to_string())
}
