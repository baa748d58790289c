//! Scroll spy - Which table of contents links point at the section in view.
//!
//! # Partition
//!
//! Every link is resolved to its target heading. Walking the links in
//! document order keeps a path of enclosing links: a heading closes every
//! open heading of the same or a deeper level (`h2` closes `h2`..`h6`).
//! Each link becomes an entry `(path, offset)` where the path starts with
//! the link itself, followed by its enclosing links. Entries are sorted by
//! the target's offset.
//!
//! # Scan
//!
//! With `adjust = anchor_offset + header.height`, entries whose
//! `offset - adjust` lies above the scroll position move to `prev`, the rest
//! stay in (or move back to) `next`. Only the difference to the previous
//! scan is emitted, so painting touches as few links as possible.

use std::cell::RefCell;
use std::collections::VecDeque;

use spark_signals::{derived, effect, on_scope_dispose};

use crate::dom::arrays::{get_offset_top, set_link_active, set_link_blur, set_link_state};
use crate::dom::{get_link_target, get_parent, get_tag};
use crate::types::{AnchorList, ElementId, Header, LinkState, Painter, Sink, Source, Viewport};

use super::passthrough;

/// Link path (link first, enclosing links after) and target offset.
type Entry = (Vec<ElementId>, f32);

// =============================================================================
// Link Table & Partition
// =============================================================================

/// A link resolved to its target heading.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    pub link: ElementId,
    pub target: ElementId,
    /// Lowercase tag of the target (`h2`, `h3`, ...).
    pub tag: String,
}

/// Resolve every link to its target. Links without a target are skipped.
pub fn build_link_table(els: &[ElementId]) -> Vec<LinkTarget> {
    els.iter()
        .filter_map(|&link| match get_link_target(link) {
            Some(target) => Some(LinkTarget {
                link,
                target,
                tag: get_tag(target).unwrap_or_default(),
            }),
            None => {
                tracing::debug!(link, "Skipping link without target");
                None
            }
        })
        .collect()
}

/// Offset of a target, falling back to the closest positioned ancestor.
///
/// Reactive: re-runs the calling effect when any of the offsets changes.
fn target_offset(target: ElementId) -> f32 {
    let mut node = target;
    let mut offset = get_offset_top(node);
    while offset == 0.0 {
        let Some(parent) = get_parent(node) else { break };
        node = parent;
        offset = get_offset_top(node);
    }
    offset
}

/// Build the sorted entry index for a link table.
fn partition(table: &[LinkTarget]) -> Vec<Entry> {
    let mut path: Vec<(ElementId, &str)> = Vec::new();
    let mut index: Vec<Entry> = Vec::with_capacity(table.len());

    for entry in table {
        let tag = entry.tag.as_str();
        while path.last().is_some_and(|(_, last)| *last >= tag) {
            path.pop();
        }
        path.push((entry.link, tag));

        let links = path.iter().rev().map(|(link, _)| *link).collect();
        index.push((links, target_offset(entry.target)));
    }

    index.sort_by(|a, b| a.1.total_cmp(&b.1));
    index
}

// =============================================================================
// Scan State
// =============================================================================

#[derive(Default)]
struct ScrollSpy {
    index: Option<Vec<Entry>>,
    prev: Vec<Entry>,
    next: VecDeque<Entry>,
    last: AnchorList,
}

impl ScrollSpy {
    /// Advance to a new scroll position. Returns the change, if any.
    fn step(&mut self, index: Vec<Entry>, adjust: f32, y: f32) -> Option<AnchorList> {
        let reset = self.index.as_ref() != Some(&index);
        if reset {
            self.prev.clear();
            self.next = index.iter().cloned().collect();
            self.index = Some(index);
        }

        let moved = self.scan(adjust, y);
        if !reset && !moved {
            return None;
        }

        let current = AnchorList {
            prev: self.prev.iter().map(|(path, _)| path.clone()).collect(),
            next: self.next.iter().map(|(path, _)| path.clone()).collect(),
        };
        let previous = std::mem::replace(&mut self.last, current.clone());
        Some(difference(&previous, &current))
    }

    fn scan(&mut self, adjust: f32, y: f32) -> bool {
        let mut moved = false;

        while self.next.front().is_some_and(|(_, offset)| *offset - adjust < y) {
            if let Some(entry) = self.next.pop_front() {
                self.prev.push(entry);
                moved = true;
            }
        }

        while self.prev.last().is_some_and(|(_, offset)| *offset - adjust >= y) {
            if let Some(entry) = self.prev.pop() {
                self.next.push_front(entry);
                moved = true;
            }
        }

        moved
    }
}

/// Links that changed between two scans.
///
/// Scrolling down reports the newly passed links (plus the one that was
/// active before). Scrolling up reports the new active link and the links
/// that moved back below the reading position.
fn difference(previous: &AnchorList, current: &AnchorList) -> AnchorList {
    if previous.prev.len() < current.prev.len() {
        AnchorList {
            prev: current.prev[previous.prev.len().saturating_sub(1)..].to_vec(),
            next: Vec::new(),
        }
    } else {
        let moved_back = current.next.len().saturating_sub(previous.next.len());
        AnchorList {
            prev: current.prev.last().cloned().into_iter().collect(),
            next: current.next[..moved_back].to_vec(),
        }
    }
}

// =============================================================================
// Watch & Paint
// =============================================================================

/// Watch which links are active.
///
/// The link table is resolved once. The partition is re-built only when a
/// target offset changes. An effect in the current scope re-scans on every
/// header, viewport or index change and forwards changes to `sink`. The first scan is always forwarded, even with zero links.
pub fn watch_anchor_list(
    els: &[ElementId],
    header: &Source<Header>,
    viewport: &Source<Viewport>,
    anchor_offset: f32,
    sink: Sink<AnchorList>,
) {
    let table = build_link_table(els);
    let header = header.clone();
    let viewport = viewport.clone();
    let spy = RefCell::new(ScrollSpy::default());

    tracing::trace!(links = els.len(), targets = table.len(), "Watching anchor list");

    // Tracks target offsets only: scrolling reuses the index.
    let index = derived(move || partition(&table));

    let _effect_cleanup = effect(move || {
        let index = index.get();
        let adjust = anchor_offset + header.get().height;
        let y = viewport.get().offset.y;

        let change = spy.borrow_mut().step(index, adjust, y);
        if let Some(list) = change {
            sink(list);
        }
    });
}

/// Paint link state onto the links of an anchor list.
///
/// Must be called inside an effect scope: every link in `els` is reset when
/// the scope is disposed.
pub fn paint_anchor_list(els: &[ElementId]) -> Painter<AnchorList> {
    let snapshot = els.to_vec();
    on_scope_dispose(move || {
        tracing::trace!(links = snapshot.len(), "Resetting anchor list");
        for &link in &snapshot {
            set_link_state(link, LinkState::NONE);
        }
    });

    passthrough(|list: &AnchorList| {
        for link in list.next.iter().filter_map(|path| path.first()) {
            set_link_state(*link, LinkState::NONE);
        }

        let active = list.prev.len().saturating_sub(1);
        for (i, path) in list.prev.iter().enumerate() {
            if let Some(&link) = path.first() {
                set_link_active(link, i == active);
                set_link_blur(link, true);
            }
        }
    })
}
