//! Core geometric types shared by the positioner, the host trait and the scene

use serde::Deserialize;

/// Round half toward positive infinity, matching how browsers round pixel values.
///
/// `f64::round` rounds halves away from zero, which differs for negative
/// halves (`-2.5` becomes `-3` instead of `-2`).
pub fn round_px(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// A 2D point (or displacement) in the shared coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer pixel offset produced by the positioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis of a measurement or displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// An axis-aligned box.
///
/// Stored as origin plus size so that `right = left + width` and
/// `bottom = top + height` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    #[serde(alias = "left", default)]
    pub x: f64,
    #[serde(alias = "top", default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a box from its four edges.
    ///
    /// An empty intersection (right left of left, bottom above top) collapses
    /// to zero size at the leading edge.
    pub fn from_edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size along an axis (width for horizontal, height for vertical)
    pub fn size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Leading edge along an axis (left or top)
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left(),
            Axis::Vertical => self.top(),
        }
    }

    /// Trailing edge along an axis (right or bottom)
    pub fn end(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right(),
            Axis::Vertical => self.bottom(),
        }
    }

    /// Intersect edge-wise with another box
    pub fn intersect(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.top().max(other.top()),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
            self.left().max(other.left()),
        )
    }

    /// Translate the box by a displacement
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink the trailing edges by the given amounts
    pub fn shrink(&self, right: f64, bottom: f64) -> Rect {
        Rect::new(
            self.x,
            self.y,
            (self.width - right).max(0.0),
            (self.height - bottom).max(0.0),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Per-edge lengths, used for CSS margins
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Leading edge along an axis (left or top)
    pub fn start(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_px_matches_browser_rounding() {
        assert_eq!(round_px(2.5), 3.0);
        assert_eq!(round_px(-2.5), -2.0);
        assert_eq!(round_px(-2.6), -3.0);
        assert_eq!(round_px(7.0), 7.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.size(Axis::Horizontal), 30.0);
        assert_eq!(r.end(Axis::Vertical), 60.0);
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 25.0, 100.0, 50.0);
        assert_eq!(a.intersect(&b), Rect::new(50.0, 25.0, 50.0, 50.0));
    }

    #[test]
    fn test_disjoint_intersection_is_empty() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn test_shrink_clamps_at_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).shrink(15.0, 4.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 6.0);
    }

    #[test]
    fn test_deserialize_with_edge_names() {
        let r: Rect = toml::from_str("left = 5\ntop = 6\nwidth = 7\nheight = 8").unwrap();
        assert_eq!(r, Rect::new(5.0, 6.0, 7.0, 8.0));
    }
}
