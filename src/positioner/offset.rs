//! Offset computation: displacement, alignment and edge clamping

use log::trace;

use crate::geometry::{round_px, Axis, Edges, Offset, Point, Rect};
use crate::settings::{MinContact, Position, Side};

/// Inputs for the offset of a floating box whose side is already resolved
#[derive(Debug, Clone, Copy)]
pub struct OffsetInput<'a> {
    pub node: &'a Rect,
    pub reference: &'a Rect,
    pub minimum: &'a Rect,
    pub side: Side,
    pub position: Position,
    pub spacing: f64,
    pub min_contact: MinContact,
    /// Origin of the element the offset is expressed relative to
    pub relative_origin: Point,
    /// Leading margins of the floating box already contributing to its position
    pub margins: Edges,
    /// Scroll offsets of the scrolling ancestor the offset is applied inside
    pub scroll: Point,
}

/// Compute the integer offset to apply to the floating box
pub fn compute_offset(input: &OffsetInput<'_>) -> Offset {
    let OffsetInput {
        node,
        reference,
        side,
        spacing,
        ..
    } = *input;

    let mut x = round_px(reference.x) - input.relative_origin.x;
    let mut y = round_px(reference.y) - input.relative_origin.y;

    match side {
        Side::Top => y -= round_px(node.height) + spacing,
        Side::Right => x += round_px(reference.width) + spacing,
        Side::Bottom => y += round_px(reference.height) + spacing,
        Side::Left => x -= round_px(node.width) + spacing,
    }

    let cross = side.cross_axis();
    let delta = reference.size(cross) - node.size(cross);
    let shift = match input.position {
        Position::Start => 0.0,
        Position::Center => delta / 2.0,
        Position::End => delta,
    };
    match cross {
        Axis::Horizontal => x += shift,
        Axis::Vertical => y += shift,
    }

    x -= input.margins.left;
    y -= input.margins.top;

    // Clamp in minimum-box coordinates, where the box's visual start is
    // offset + relative origin + margin.
    let lead = input.relative_origin_along(cross) + input.margins.start(cross);
    match cross {
        Axis::Horizontal => x = clamp_cross(input, cross, x + lead) - lead,
        Axis::Vertical => y = clamp_cross(input, cross, y + lead) - lead,
    }

    Offset::new(
        (round_px(x) + round_px(input.scroll.x)) as i32,
        (round_px(y) + round_px(input.scroll.y)) as i32,
    )
}

impl OffsetInput<'_> {
    fn relative_origin_along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.relative_origin.x,
            Axis::Vertical => self.relative_origin.y,
        }
    }
}

/// Pull the box back inside the minimum box along `axis`, never past the
/// point where it would overlap the reference by less than the contact length.
fn clamp_cross(input: &OffsetInput<'_>, axis: Axis, start: f64) -> f64 {
    let size = input.node.size(axis);
    let reference_start = input.reference.start(axis);
    let reference_end = input.reference.end(axis);
    let contact = input
        .min_contact
        .resolve(input.reference.size(axis), size);

    let mut start = start;
    if start + size > input.minimum.end(axis) {
        let clamped = (input.minimum.end(axis) - size).max(reference_start + contact - size);
        trace!("clamping {:?} end: {} -> {}", axis, start, clamped);
        start = clamped;
    }
    if start < input.minimum.start(axis) {
        let clamped = input.minimum.start(axis).min(reference_end - contact);
        trace!("clamping {:?} start: {} -> {}", axis, start, clamped);
        start = clamped;
    }
    start
}
