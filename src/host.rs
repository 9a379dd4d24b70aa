//! The boundary between the positioner and the environment that owns the elements
//!
//! A host measures elements, answers structural questions about the element
//! tree and applies the computed visual updates. The positioner never touches
//! elements directly.

use std::cell::OnceCell;
use std::fmt;

use serde::Deserialize;

use crate::geometry::{Edges, Point, Rect};
use crate::settings::Side;
use crate::style::{ArrowStyle, NodeStyle};

/// Stable handle for an element owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which native scrollbars an element (or the window) currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Scrollbars {
    /// A vertical scrollbar eats into the width
    pub vertical: bool,
    /// A horizontal scrollbar eats into the height
    pub horizontal: bool,
}

/// Window metrics, in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Document scroll position
    pub scroll: Point,
    /// Inner width including any scrollbar
    pub width: f64,
    /// Inner height including any scrollbar
    pub height: f64,
    pub scrollbars: Scrollbars,
}

/// Environment the positioner measures and writes through.
///
/// All rects are reported in document coordinates, except for floating boxes
/// where [`LayoutHost::is_fixed`] is true; those computations use viewport
/// coordinates throughout.
pub trait LayoutHost {
    /// Measure the border box of an element
    fn measure(&self, element: ElementId) -> Rect;

    /// Current window metrics
    fn viewport(&self) -> Viewport;

    /// Thickness of a native scrollbar in pixels
    fn scrollbar_thickness(&self) -> f64;

    /// Nearest `position: relative` ancestor, or `None` for the document origin
    fn relative_parent(&self, element: ElementId) -> Option<ElementId>;

    /// Nearest ancestor that is both `position: relative` and scrollable
    fn scroll_parent(&self, element: ElementId) -> Option<ElementId>;

    /// Current scroll offsets of an element
    fn scroll_offsets(&self, element: ElementId) -> Point;

    /// Scrollbars currently shown by an element
    fn scrollbars(&self, element: ElementId) -> Scrollbars;

    /// Computed CSS margins of an element
    fn margins(&self, element: ElementId) -> Edges;

    /// Whether the element is attached to the document and rendered
    fn is_connected_and_visible(&self, element: ElementId) -> bool;

    /// Whether `element` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool;

    /// Whether the element is `position: fixed`
    fn is_fixed(&self, _element: ElementId) -> bool {
        false
    }

    /// Write the floating box offset
    fn apply_style(&mut self, element: ElementId, style: &NodeStyle);

    /// Write the arrow offset
    fn apply_arrow_style(&mut self, arrow: ElementId, style: &ArrowStyle);

    /// Record the resolved placement on an element for styling hooks
    fn set_placement_attribute(&mut self, _element: ElementId, _side: Side) {}
}

/// Scrollbar thickness, measured through the host at most once
#[derive(Debug, Default)]
pub struct ScrollbarCache {
    thickness: OnceCell<f64>,
}

impl ScrollbarCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_measure<H: LayoutHost + ?Sized>(&self, host: &H) -> f64 {
        *self
            .thickness
            .get_or_init(|| host.scrollbar_thickness())
    }

    /// The cached value, if already measured
    pub fn get(&self) -> Option<f64> {
        self.thickness.get().copied()
    }
}
