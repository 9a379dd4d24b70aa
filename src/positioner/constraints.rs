//! Assembly of the minimum box the floating element must stay inside

use crate::geometry::Rect;
use crate::host::{Scrollbars, Viewport};

/// The visible window area, minus any scrollbars.
///
/// Fixed-positioned floating boxes live in viewport coordinates, so their
/// window box starts at the origin regardless of document scroll.
pub fn viewport_box(viewport: &Viewport, scrollbar_thickness: f64, fixed: bool) -> Rect {
    let (x, y) = if fixed {
        (0.0, 0.0)
    } else {
        (viewport.scroll.x, viewport.scroll.y)
    };
    Rect::new(x, y, viewport.width, viewport.height).shrink(
        scrollbar_allowance(viewport.scrollbars.vertical, scrollbar_thickness),
        scrollbar_allowance(viewport.scrollbars.horizontal, scrollbar_thickness),
    )
}

/// A scrolling ancestor's box with its own scrollbars taken out
pub fn scroll_container_box(measured: Rect, scrollbars: Scrollbars, scrollbar_thickness: f64) -> Rect {
    measured.shrink(
        scrollbar_allowance(scrollbars.vertical, scrollbar_thickness),
        scrollbar_allowance(scrollbars.horizontal, scrollbar_thickness),
    )
}

fn scrollbar_allowance(present: bool, thickness: f64) -> f64 {
    if present {
        thickness
    } else {
        0.0
    }
}

/// Intersect the viewport box with the optional scroll container and explicit container
pub fn minimum_box(viewport: Rect, scroll_container: Option<Rect>, container: Option<Rect>) -> Rect {
    [scroll_container, container]
        .into_iter()
        .flatten()
        .fold(viewport, |acc, constraint| acc.intersect(&constraint))
}
