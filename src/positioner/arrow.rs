//! Arrow alignment along the cross axis of the placement

use crate::geometry::{round_px, Axis, Rect};
use crate::settings::{Position, Side};
use crate::style::ArrowStyle;

/// Inputs for aligning an arrow, measured after the floating box moved
#[derive(Debug, Clone, Copy)]
pub struct ArrowInput<'a> {
    /// Floating box, re-measured at its new position
    pub node: &'a Rect,
    pub reference: &'a Rect,
    pub arrow: &'a Rect,
    pub side: Side,
    pub position: Position,
}

/// Compute where the arrow sits inside the floating box.
///
/// The arrow is kept over the part of the cross axis shared by the reference
/// and the floating box, so it always points at the reference.
pub fn arrow_offset(input: &ArrowInput<'_>) -> ArrowStyle {
    let axis = input.side.cross_axis();
    let arrow_size = input.arrow.size(axis);
    let thickness = input.arrow.size(input.side.main_axis());

    let node_size = input.node.size(axis);
    let reference_size = input.reference.size(axis);
    let delta = reference_size - node_size;

    let candidate = (node_size - arrow_size) / 2.0
        + match input.position {
            Position::Start => delta / 2.0,
            Position::Center => 0.0,
            Position::End => -delta / 2.0,
        };

    let origin = input.node.start(axis);
    let mut lo = input.reference.start(axis).max(input.node.start(axis)) - origin;
    let mut hi = input.reference.end(axis).min(input.node.end(axis)) - origin;

    if reference_size < arrow_size {
        let deficit = (arrow_size - reference_size) / 2.0;
        lo -= deficit;
        hi = hi - arrow_size + deficit;
    } else if axis == Axis::Vertical && reference_size < 2.0 * arrow_size {
        hi -= arrow_size / 2.0;
    } else {
        hi -= arrow_size;
    }

    let (candidate, lo, hi) = (round_px(candidate), round_px(lo), round_px(hi));

    ArrowStyle {
        edge: input.side.opposite(),
        inset: -thickness.floor(),
        offset: candidate.min(hi).max(lo),
    }
}
