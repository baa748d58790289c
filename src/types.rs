//! Core types for spark-toc.
//!
//! Geometry snapshots flowing in (header, main area, viewport), the derived
//! states flowing out (sidebar, anchor list) and the combined widget state.
//!
//! Every type that travels through a `Signal` derives `Clone + PartialEq`.

use std::rc::Rc;

use spark_signals::Signal;

/// Index of an element in the page arena (see [`crate::dom`]).
pub type ElementId = usize;

/// Cleanup function returned by mounts and activations.
///
/// Call this to tear down effects and reset painted state.
pub type Cleanup = Box<dyn FnOnce()>;

/// Receives every value a derivation emits.
pub type Sink<T> = Rc<dyn Fn(T)>;

/// Side-effecting passthrough stage: paints the value, returns it unchanged.
pub type Painter<T> = Box<dyn Fn(T) -> T>;

// =============================================================================
// Geometry
// =============================================================================

/// 2D offset in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

/// 2D size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Sticky header state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Header {
    /// Header is sticky (stays at the top while scrolling).
    pub sticky: bool,
    /// Rendered header height.
    pub height: f32,
}

/// Main content column state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Main {
    /// Top offset of the main area, adjusted for the header.
    pub offset: f32,
    /// Visible height of the main area.
    pub height: f32,
    /// Header overlaps the main area.
    pub active: bool,
}

/// Window scroll offset and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub offset: Offset,
    pub size: Size,
}

impl Viewport {
    /// Viewport scrolled to `y` with the given window size.
    pub fn at(y: f32, width: f32, height: f32) -> Self {
        Self {
            offset: Offset { x: 0.0, y },
            size: Size { width, height },
        }
    }
}

// =============================================================================
// Derived States
// =============================================================================

/// Geometry of the sticky sidebar for the current viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sidebar {
    /// Painted sidebar height.
    pub height: f32,
    /// Sidebar is locked to the top of the viewport.
    pub lock: bool,
}

/// Anchors whose state changed with the last scroll step.
///
/// Each entry is an anchor path: the anchor itself first, then its
/// ancestors in the outline. The last entry of `prev` is the active anchor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnchorList {
    /// Anchors above the reading position.
    pub prev: Vec<Vec<ElementId>>,
    /// Anchors that moved back below the reading position.
    pub next: Vec<Vec<ElementId>>,
}

impl AnchorList {
    /// Anchor currently marked active, if any.
    pub fn active(&self) -> Option<ElementId> {
        self.prev.last().and_then(|path| path.first().copied())
    }
}

/// Externally observable state of a mounted table of contents.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOfContentsState {
    /// Below the tablet breakpoint. Nothing is derived.
    BelowTablet,
    /// Above the tablet breakpoint.
    AboveTablet {
        sidebar: Sidebar,
        anchors: AnchorList,
    },
}

impl TableOfContentsState {
    pub fn is_above_tablet(&self) -> bool {
        matches!(self, TableOfContentsState::AboveTablet { .. })
    }
}

// =============================================================================
// Link State (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Painted state of a table of contents link.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LinkState: u8 {
        const NONE = 0;
        /// Link points at the section currently being read.
        const ACTIVE = 1 << 0;
        /// Link points at a section that was already passed.
        const BLUR = 1 << 1;
    }
}

// =============================================================================
// Source - Reactive input wrapper
// =============================================================================

/// An input state stream: a static value, a signal, or a getter.
///
/// Reading a `Signal` or `Getter` inside an effect tracks it, so the effect
/// re-runs whenever the input changes. Wrap a `Derived` in a `Getter`.
#[derive(Clone)]
pub enum Source<T: Clone + PartialEq + 'static> {
    /// Static value (never changes).
    Static(T),
    /// Reactive signal.
    Signal(Signal<T>),
    /// Getter function (called each time the value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> Source<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            Source::Static(v) => v.clone(),
            Source::Signal(s) => s.get(),
            Source::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for Source<T> {
    fn from(value: T) -> Self {
        Source::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for Source<T> {
    fn from(signal: Signal<T>) -> Self {
        Source::Signal(signal)
    }
}
