//! Placement resolution: choosing the side of the reference to place on

use log::trace;

use crate::geometry::{Axis, Rect};
use crate::settings::{Placement, Side};

/// Room available on each side of the reference inside the minimum box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Space {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Space {
    pub fn around(reference: &Rect, minimum: &Rect) -> Self {
        Self {
            top: reference.top() - minimum.top(),
            right: minimum.right() - reference.right(),
            bottom: minimum.bottom() - reference.bottom(),
            left: reference.left() - minimum.left(),
        }
    }

    pub fn on(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}

/// Room the floating box needs on a side: its size along that side's axis plus spacing
fn required(node: &Rect, side: Side, spacing: f64) -> f64 {
    node.size(side.main_axis()) + spacing
}

/// Resolve the requested placement to a concrete side
pub fn resolve_placement(
    node: &Rect,
    reference: &Rect,
    minimum: &Rect,
    requested: Placement,
    spacing: f64,
    fixed: bool,
) -> Side {
    let space = Space::around(reference, minimum);
    match requested.side() {
        Some(side) if fixed => side,
        Some(side) => flip_if_cramped(side, &space, node, spacing),
        None => auto_side(&space, node, reference, spacing),
    }
}

fn flip_if_cramped(side: Side, space: &Space, node: &Rect, spacing: f64) -> Side {
    let opposite = side.opposite();
    if space.on(side) < required(node, side, spacing) && space.on(opposite) > space.on(side) {
        trace!("flipping placement {} -> {}", side, opposite);
        opposite
    } else {
        side
    }
}

/// Fallback priority when no axis fits cleanly
const AUTO_ORDER: [Side; 4] = [Side::Bottom, Side::Top, Side::Right, Side::Left];

fn auto_side(space: &Space, node: &Rect, reference: &Rect, spacing: f64) -> Side {
    let max_v = space.top.max(space.bottom);
    let max_h = space.right.max(space.left);
    let min_v = space.top.min(space.bottom);
    let min_h = space.right.min(space.left);

    let overhang = |axis: Axis| (node.size(axis) - reference.size(axis)).max(0.0);

    if max_h > max_v
        && max_h >= node.width + spacing
        && min_v + reference.height >= node.height + spacing - overhang(Axis::Vertical)
    {
        return if space.left > space.right {
            Side::Left
        } else {
            Side::Right
        };
    }

    if max_v >= node.height + spacing
        && min_h + reference.width >= node.width + spacing - overhang(Axis::Horizontal)
    {
        return if space.bottom > space.top {
            Side::Bottom
        } else {
            Side::Top
        };
    }

    let largest = AUTO_ORDER
        .iter()
        .map(|side| space.on(*side))
        .fold(f64::NEG_INFINITY, f64::max);
    AUTO_ORDER
        .into_iter()
        .find(|side| space.on(*side) == largest && largest >= required(node, *side, spacing))
        .unwrap_or(Side::Bottom)
}
