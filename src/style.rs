//! Visual updates emitted for the host to apply

use std::fmt;

use crate::geometry::Offset;
use crate::settings::Side;

/// How the floating box offset is written onto the element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    /// `transform: translate3d(Xpx, Ypx, 0)`
    Transform(Offset),
    /// `margin-left: Xpx; margin-top: Ypx`
    Margin(Offset),
}

impl NodeStyle {
    pub fn new(offset: Offset, use_gpu: bool) -> Self {
        if use_gpu {
            NodeStyle::Transform(offset)
        } else {
            NodeStyle::Margin(offset)
        }
    }

    pub fn offset(&self) -> Offset {
        match self {
            NodeStyle::Transform(offset) | NodeStyle::Margin(offset) => *offset,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            NodeStyle::Transform(o) => format!("transform: translate3d({}px, {}px, 0)", o.x, o.y),
            NodeStyle::Margin(o) => format!("margin-left: {}px; margin-top: {}px", o.x, o.y),
        }
    }
}

impl fmt::Display for NodeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Arrow position inside the floating box.
///
/// `edge` is the side of the arrow touching the floating box, pulled outward
/// by `inset`. `offset` runs along the cross axis of the placement: `left`
/// for top/bottom placements, `top` for left/right placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowStyle {
    pub edge: Side,
    pub inset: f64,
    pub offset: f64,
}

impl ArrowStyle {
    /// CSS property carrying the cross-axis offset
    pub fn offset_property(&self) -> &'static str {
        match self.edge {
            Side::Top | Side::Bottom => "left",
            Side::Left | Side::Right => "top",
        }
    }

    pub fn to_css(&self) -> String {
        format!(
            "{}: {}px; {}: {}px",
            self.edge, self.inset, self.offset_property(), self.offset
        )
    }
}

impl fmt::Display for ArrowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
