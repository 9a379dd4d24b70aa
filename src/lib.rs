//! Tether - placement engine for floating elements
//!
//! Computes where a floating box (tooltip, popover, dropdown) goes relative
//! to a reference box, flipping to the roomier side and clamping against the
//! viewport, a scrolling ancestor and an optional container. A registry keeps
//! live positioners in sync with resizes and scrolls.
//!
//! The geometry lives in [`positioner`] and is pure. Measuring and applying
//! happen through a [`LayoutHost`]; [`Scene`] is an in-memory host.
//!
//! # Example
//!
//! ```rust
//! use tether::{position_scene, NodeStyle, Offset};
//!
//! let placed = position_scene(r#"
//!     [viewport]
//!     width = 800
//!     height = 600
//!
//!     [[element]]
//!     name = "button"
//!     rect = { width = 100, height = 20 }
//!
//!     [[element]]
//!     name = "menu"
//!     rect = { width = 50, height = 10 }
//!
//!     [[float]]
//!     node = "menu"
//!     reference = "button"
//! "#).unwrap();
//!
//! let menu = placed[0].outcome.result().unwrap();
//! assert_eq!(menu.offset, Offset::new(25, 20));
//! assert_eq!(menu.style, NodeStyle::Transform(Offset::new(25, 20)));
//! ```

pub mod error;
pub mod geometry;
pub mod host;
pub mod instance;
pub mod positioner;
pub mod registry;
pub mod scene;
pub mod settings;
pub mod style;

pub use error::{HookStage, PositionError};
pub use geometry::{Axis, Edges, Offset, Point, Rect};
pub use host::{ElementId, LayoutHost, ScrollbarCache, Scrollbars, Viewport};
pub use instance::{PositionResult, Positioner, UpdateOutcome};
pub use registry::{InstanceId, ListenerChange, Registration, Registry, ScrollTarget};
pub use scene::{Scene, SceneElement, SceneError};
pub use settings::{
    ConfigError, MinContact, Placement, Position, PositionerConfig, Settings, Side, TextDirection,
};
pub use style::{ArrowStyle, NodeStyle};

/// A floating box from a scene document after one tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFloat {
    /// Element name from the scene document
    pub name: String,
    pub id: InstanceId,
    pub outcome: UpdateOutcome,
}

/// Position every `[[float]]` of a scene document with default handling
pub fn position_scene(source: &str) -> Result<Vec<PlacedFloat>, SceneError> {
    let mut scene = Scene::from_toml_str(source)?;
    position_all(&mut scene)
}

/// Register every `[[float]]` of a loaded scene and run one tick.
///
/// Each positioner's first update is deferred to the tick, the way a
/// freshly shown floating box waits one frame for layout.
pub fn position_all(scene: &mut Scene) -> Result<Vec<PlacedFloat>, SceneError> {
    let mut registry = Registry::new();
    let mut names = Vec::new();

    for entry in scene.floats().to_vec() {
        let (node, settings) = scene.settings_for(&entry)?;
        let registration = registry.create(node, settings)?;
        registry.schedule(registration.id)?;
        names.push((registration.id, entry.node));
    }

    let mut outcomes = registry.flush(scene)?;
    Ok(names
        .into_iter()
        .filter_map(|(id, name)| {
            let index = outcomes.iter().position(|(done, _)| *done == id)?;
            let (_, outcome) = outcomes.swap_remove(index);
            Some(PlacedFloat { name, id, outcome })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"
[viewport]
width = 800
height = 600

[[element]]
name = "button"
rect = { left = 300, top = 10, width = 100, height = 20 }

[[element]]
name = "tooltip"
rect = { width = 60, height = 30 }

[[element]]
name = "tip"
rect = { width = 10, height = 5 }
parent = "tooltip"

[[float]]
node = "tooltip"
reference = "button"
arrow = "tip"
placement = "top"
spacing = 5
"#;

    #[test]
    fn test_position_scene_flips_and_aligns_arrow() {
        let placed = position_scene(SCENE).unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].name, "tooltip");

        let result = placed[0].outcome.result().unwrap();
        assert_eq!(result.placement, Side::Bottom);
        assert_eq!(result.offset, Offset::new(320, 35));

        let arrow = result.arrow.unwrap();
        assert_eq!(arrow.edge, Side::Top);
        assert_eq!(arrow.offset, 25.0);
    }

    #[test]
    fn test_position_scene_unknown_reference() {
        let source = SCENE.replace(r#"reference = "button""#, r#"reference = "nope""#);
        let err = position_scene(&source).unwrap_err();
        assert!(matches!(err, SceneError::UnknownElement { .. }));
    }

    #[test]
    fn test_position_scene_missing_reference() {
        let source = SCENE.replace(r#"reference = "button""#, "");
        let err = position_scene(&source).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Position(PositionError::MissingReference { .. })
        ));
    }

    #[test]
    fn test_position_scene_invalid_toml() {
        let result = position_scene("this is not valid toml {{{{");
        assert!(matches!(result, Err(SceneError::ParseError(_))));
    }
}
