//! Pure positioning geometry
//!
//! Given measured boxes and settings, resolve which side of the reference the
//! floating box goes on and the pixel offset that puts it there. Nothing in
//! this module touches a host; inputs are snapshots and are never mutated.

pub mod arrow;
pub mod constraints;
pub mod offset;
pub mod placement;

pub use arrow::{arrow_offset, ArrowInput};
pub use constraints::{minimum_box, scroll_container_box, viewport_box};
pub use offset::{compute_offset, OffsetInput};
pub use placement::{resolve_placement, Space};

use crate::geometry::{Edges, Offset, Point, Rect};
use crate::settings::{Position, PositionerConfig, Side};

/// Snapshot of everything one positioning pass reads
#[derive(Debug, Clone, Copy)]
pub struct PositionInput<'a> {
    pub node: &'a Rect,
    pub reference: &'a Rect,
    pub minimum: &'a Rect,
    pub config: &'a PositionerConfig,
    /// Origin of the nearest `position: relative` ancestor
    pub relative_origin: Point,
    /// Leading margins of the floating box
    pub margins: Edges,
    /// Scroll offsets of the scrolling ancestor
    pub scroll: Point,
}

/// Resolved side, physical alignment and offset for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Computed {
    pub side: Side,
    pub position: Position,
    pub offset: Offset,
}

/// Resolve the placement, map the alignment for the writing direction, then
/// compute the offset for both
pub fn compute(input: &PositionInput<'_>) -> Computed {
    let config = input.config;
    let side = resolve_placement(
        input.node,
        input.reference,
        input.minimum,
        config.placement,
        config.spacing,
        config.fixed,
    );
    let position = config.position.for_direction(config.direction, side);
    let offset = compute_offset(&OffsetInput {
        node: input.node,
        reference: input.reference,
        minimum: input.minimum,
        side,
        position,
        spacing: config.spacing,
        min_contact: config.min_contact,
        relative_origin: input.relative_origin,
        margins: input.margins,
        scroll: input.scroll,
    });
    Computed {
        side,
        position,
        offset,
    }
}
