//! Page Arrays - Layout offsets and painted state.
//!
//! - offsetTop / offsetHeight: layout box, written by the host on reflow
//! - sidebarHeight / sidebarLock: written by the sidebar painter
//! - linkState: active/blur flags, written by the anchor list painter
//!
//! Uses `TrackedSlotArray` for stable reactive cells with fine-grained
//! tracking. `get_*` reads are reactive, `peek_*` reads are not.

use spark_signals::TrackedSlotArray;

use crate::types::{ElementId, LinkState};

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Offset from the top of the offset parent.
    static OFFSET_TOP: TrackedSlotArray<f32> = TrackedSlotArray::new(Some(0.0));

    /// Rendered height.
    static OFFSET_HEIGHT: TrackedSlotArray<f32> = TrackedSlotArray::new(Some(0.0));

    /// Painted sidebar height (None = not painted).
    static SIDEBAR_HEIGHT: TrackedSlotArray<Option<f32>> = TrackedSlotArray::new(Some(None));

    /// Sidebar locked to the viewport.
    static SIDEBAR_LOCK: TrackedSlotArray<bool> = TrackedSlotArray::new(Some(false));

    /// Painted link state.
    static LINK_STATE: TrackedSlotArray<LinkState> = TrackedSlotArray::new(Some(LinkState::NONE));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure all arrays have capacity for the given index.
///
/// Called by the registry when allocating.
pub fn ensure_all_capacity(index: ElementId) {
    OFFSET_TOP.with(|arr| { let _ = arr.peek(index); });
    OFFSET_HEIGHT.with(|arr| { let _ = arr.peek(index); });
    SIDEBAR_HEIGHT.with(|arr| { let _ = arr.peek(index); });
    SIDEBAR_LOCK.with(|arr| { let _ = arr.peek(index); });
    LINK_STATE.with(|arr| { let _ = arr.peek(index); });
}

/// Clear all array values at an index.
///
/// Called by the registry when releasing.
pub fn clear_all_at_index(index: ElementId) {
    OFFSET_TOP.with(|arr| arr.clear(index));
    OFFSET_HEIGHT.with(|arr| arr.clear(index));
    SIDEBAR_HEIGHT.with(|arr| arr.clear(index));
    SIDEBAR_LOCK.with(|arr| arr.clear(index));
    LINK_STATE.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset_all_arrays() {
    OFFSET_TOP.with(|arr| arr.clear_all());
    OFFSET_HEIGHT.with(|arr| arr.clear_all());
    SIDEBAR_HEIGHT.with(|arr| arr.clear_all());
    SIDEBAR_LOCK.with(|arr| arr.clear_all());
    LINK_STATE.with(|arr| arr.clear_all());
}

// =============================================================================
// Layout
// =============================================================================

/// Get offset top at index (reactive).
pub fn get_offset_top(index: ElementId) -> f32 {
    OFFSET_TOP.with(|arr| arr.get(index))
}

/// Get offset top at index without tracking.
pub fn peek_offset_top(index: ElementId) -> f32 {
    OFFSET_TOP.with(|arr| arr.peek(index))
}

/// Set offset top at index (host reflow).
pub fn set_offset_top(index: ElementId, offset: f32) {
    OFFSET_TOP.with(|arr| arr.set_value(index, offset));
}

/// Get rendered height at index (reactive).
pub fn get_offset_height(index: ElementId) -> f32 {
    OFFSET_HEIGHT.with(|arr| arr.get(index))
}

/// Set rendered height at index (host reflow).
pub fn set_offset_height(index: ElementId, height: f32) {
    OFFSET_HEIGHT.with(|arr| arr.set_value(index, height));
}

// =============================================================================
// Sidebar
// =============================================================================

/// Get painted sidebar height at index (reactive).
pub fn get_sidebar_height(index: ElementId) -> Option<f32> {
    SIDEBAR_HEIGHT.with(|arr| arr.get(index))
}

/// Get painted sidebar height without tracking.
pub fn peek_sidebar_height(index: ElementId) -> Option<f32> {
    SIDEBAR_HEIGHT.with(|arr| arr.peek(index))
}

pub fn set_sidebar_height(index: ElementId, height: f32) {
    SIDEBAR_HEIGHT.with(|arr| arr.set_value(index, Some(height)));
}

pub fn reset_sidebar_height(index: ElementId) {
    SIDEBAR_HEIGHT.with(|arr| arr.set_value(index, None));
}

/// Get sidebar lock at index (reactive).
pub fn get_sidebar_lock(index: ElementId) -> bool {
    SIDEBAR_LOCK.with(|arr| arr.get(index))
}

/// Get sidebar lock without tracking.
pub fn peek_sidebar_lock(index: ElementId) -> bool {
    SIDEBAR_LOCK.with(|arr| arr.peek(index))
}

pub fn set_sidebar_lock(index: ElementId, lock: bool) {
    SIDEBAR_LOCK.with(|arr| arr.set_value(index, lock));
}

// =============================================================================
// Links
// =============================================================================

/// Get link state at index (reactive).
pub fn get_link_state(index: ElementId) -> LinkState {
    LINK_STATE.with(|arr| arr.get(index))
}

/// Get link state without tracking.
pub fn peek_link_state(index: ElementId) -> LinkState {
    LINK_STATE.with(|arr| arr.peek(index))
}

pub fn set_link_state(index: ElementId, state: LinkState) {
    LINK_STATE.with(|arr| arr.set_value(index, state));
}

/// Set or clear the active flag, keeping blur.
pub fn set_link_active(index: ElementId, active: bool) {
    let mut state = peek_link_state(index);
    state.set(LinkState::ACTIVE, active);
    set_link_state(index, state);
}

/// Set or clear the blur flag, keeping active.
pub fn set_link_blur(index: ElementId, blur: bool) {
    let mut state = peek_link_state(index);
    state.set(LinkState::BLUR, blur);
    set_link_state(index, state);
}
