//! Element Registry - Index allocation and tree structure.
//!
//! Manages the lifecycle of element indices:
//! - `id` attribute ↔ index bidirectional mapping
//! - Free index pool for O(1) reuse
//! - Parent / ordered children links (document order)
//! - Static attributes: tag name, classes, link target
//!
//! Structure reads are NOT reactive. Queries made while an effect runs never
//! subscribe that effect to later tree mutations.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use crate::types::ElementId;

use super::arrays;

// =============================================================================
// Registry State
// =============================================================================

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    href: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

thread_local! {
    /// Map element `id` attribute to array index.
    static ID_TO_INDEX: RefCell<HashMap<String, ElementId>> = RefCell::new(HashMap::new());

    /// Map array index to element `id` attribute.
    static INDEX_TO_ID: RefCell<HashMap<ElementId, String>> = RefCell::new(HashMap::new());

    /// Per-element attributes and tree links.
    static ELEMENTS: RefCell<HashMap<ElementId, ElementData>> = RefCell::new(HashMap::new());

    /// Set of currently allocated indices.
    static ALLOCATED_INDICES: RefCell<BTreeSet<ElementId>> = RefCell::new(BTreeSet::new());

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<ElementId>> = RefCell::new(Vec::new());

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<ElementId> = const { RefCell::new(0) };
}

// =============================================================================
// Element Creation
// =============================================================================

/// Properties for a new element.
///
/// ```ignore
/// let toc = create_element(ElementProps {
///     tag: "nav".into(),
///     id: Some("toc".into()),
///     offset_top: 120.0,
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct ElementProps {
    /// Tag name, lower case (`a`, `nav`, `h2`).
    pub tag: String,
    /// `id` attribute.
    pub id: Option<String>,
    /// `class` attribute, split on whitespace.
    pub classes: Vec<String>,
    /// `href` attribute of links.
    pub href: Option<String>,
    /// Parent element. Appended as its last child.
    pub parent: Option<ElementId>,
    /// Layout offset from the top of the offset parent.
    pub offset_top: f32,
    /// Rendered height.
    pub offset_height: f32,
}

/// Create an element and return its index.
pub fn create_element(props: ElementProps) -> ElementId {
    let index = FREE_INDICES.with(|free| {
        let mut free = free.borrow_mut();
        if let Some(index) = free.pop() {
            index
        } else {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        }
    });

    if let Some(id) = props.id {
        ID_TO_INDEX.with(|map| {
            map.borrow_mut().insert(id.clone(), index);
        });
        INDEX_TO_ID.with(|map| {
            map.borrow_mut().insert(index, id);
        });
    }

    let parent = props.parent.filter(|p| is_allocated(*p));
    ELEMENTS.with(|elements| {
        let mut elements = elements.borrow_mut();
        if let Some(parent) = parent.and_then(|p| elements.get_mut(&p)) {
            parent.children.push(index);
        }
        elements.insert(
            index,
            ElementData {
                tag: props.tag.to_ascii_lowercase(),
                classes: props.classes,
                href: props.href,
                parent,
                children: Vec::new(),
            },
        );
    });
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });

    arrays::ensure_all_capacity(index);
    arrays::set_offset_top(index, props.offset_top);
    arrays::set_offset_height(index, props.offset_height);

    index
}

/// Remove an element (and all its descendants) from the page.
pub fn release_element(index: ElementId) {
    let Some(data) = ELEMENTS.with(|elements| elements.borrow_mut().remove(&index)) else {
        return;
    };

    for child in data.children {
        release_element(child);
    }

    if let Some(parent) = data.parent {
        ELEMENTS.with(|elements| {
            if let Some(parent) = elements.borrow_mut().get_mut(&parent) {
                parent.children.retain(|&c| c != index);
            }
        });
    }

    if let Some(id) = INDEX_TO_ID.with(|map| map.borrow_mut().remove(&index)) {
        ID_TO_INDEX.with(|map| {
            map.borrow_mut().remove(&id);
        });
    }
    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });

    arrays::clear_all_at_index(index);

    FREE_INDICES.with(|free| {
        free.borrow_mut().push(index);
    });
}

// =============================================================================
// Lookups
// =============================================================================

/// Element with the given `id` attribute.
pub fn get_element_by_id(id: &str) -> Option<ElementId> {
    ID_TO_INDEX.with(|map| map.borrow().get(id).copied())
}

/// `id` attribute of an element.
pub fn get_id(index: ElementId) -> Option<String> {
    INDEX_TO_ID.with(|map| map.borrow().get(&index).cloned())
}

/// Tag name of an element (lower case).
pub fn get_tag(index: ElementId) -> Option<String> {
    ELEMENTS.with(|elements| elements.borrow().get(&index).map(|e| e.tag.clone()))
}

/// Check whether an element carries a class.
pub fn has_class(index: ElementId, class: &str) -> bool {
    ELEMENTS.with(|elements| {
        elements
            .borrow()
            .get(&index)
            .is_some_and(|e| e.classes.iter().any(|c| c == class))
    })
}

/// `href` attribute of an element.
pub fn get_href(index: ElementId) -> Option<String> {
    ELEMENTS.with(|elements| elements.borrow().get(&index).and_then(|e| e.href.clone()))
}

/// Parent of an element.
pub fn get_parent(index: ElementId) -> Option<ElementId> {
    ELEMENTS.with(|elements| elements.borrow().get(&index).and_then(|e| e.parent))
}

/// Children of an element in document order.
pub fn get_children(index: ElementId) -> Vec<ElementId> {
    ELEMENTS.with(|elements| {
        elements
            .borrow()
            .get(&index)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    })
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: ElementId) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

/// Count of elements on the page.
pub fn get_element_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Remove every element and reset all arrays.
pub fn reset_document() {
    ID_TO_INDEX.with(|map| map.borrow_mut().clear());
    INDEX_TO_ID.with(|map| map.borrow_mut().clear());
    ELEMENTS.with(|elements| elements.borrow_mut().clear());
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    arrays::reset_all_arrays();
}
