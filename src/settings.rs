//! Positioner settings: placement enums, the serializable config and hooks
//!
//! `PositionerConfig` holds the plain-data options and can be loaded from
//! TOML. `Settings` pairs a config with the element handles a positioner
//! works on and the optional lifecycle hooks.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::Axis;
use crate::host::ElementId;

/// Errors that can occur when loading positioner configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Requested side of the reference to place the floating box on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
    Auto,
}

impl Placement {
    /// The concrete side, or `None` for `Auto`
    pub fn side(self) -> Option<Side> {
        match self {
            Placement::Top => Some(Side::Top),
            Placement::Right => Some(Side::Right),
            Placement::Bottom => Some(Side::Bottom),
            Placement::Left => Some(Side::Left),
            Placement::Auto => None,
        }
    }
}

impl From<Side> for Placement {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Placement::Top,
            Side::Right => Placement::Right,
            Side::Bottom => Placement::Bottom,
            Side::Left => Placement::Left,
        }
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Placement::Auto),
            other => other.parse::<Side>().map(Placement::from),
        }
    }
}

/// A resolved placement: one of the four sides of the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }

    /// Axis the floating box is displaced along
    pub fn main_axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Vertical,
            Side::Left | Side::Right => Axis::Horizontal,
        }
    }

    /// Axis the floating box is aligned and clamped along
    pub fn cross_axis(self) -> Axis {
        self.main_axis().cross()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Side::Top),
            "right" => Ok(Side::Right),
            "bottom" => Ok(Side::Bottom),
            "left" => Ok(Side::Left),
            other => Err(format!("unknown placement '{}'", other)),
        }
    }
}

/// Cross-axis alignment of the floating box against the reference.
///
/// `Start` and `End` are logical. They become physical (left/top and
/// right/bottom) once the side is resolved; see [`Position::for_direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Start,
    #[default]
    Center,
    End,
}

/// Inline writing direction of the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl Position {
    /// Map a logical position to a physical one for a resolved side.
    ///
    /// Only horizontal alignment mirrors in right-to-left documents, which
    /// happens for top and bottom placements.
    pub fn for_direction(self, direction: TextDirection, side: Side) -> Position {
        let horizontal_alignment = side.cross_axis() == Axis::Horizontal;
        match (direction, horizontal_alignment, self) {
            (TextDirection::Rtl, true, Position::Start) => Position::End,
            (TextDirection::Rtl, true, Position::End) => Position::Start,
            _ => self,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Start => "start",
            Position::Center => "center",
            Position::End => "end",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum overlap kept with the reference when clamping.
///
/// Written as `false` (use the smaller of the reference and floating cross
/// sizes) or a number of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "MinContactRepr")]
pub enum MinContact {
    #[default]
    Auto,
    Px(f64),
}

impl MinContact {
    /// Resolve the contact length for the given cross-axis sizes
    pub fn resolve(self, reference_size: f64, node_size: f64) -> f64 {
        match self {
            MinContact::Auto => reference_size.min(node_size),
            MinContact::Px(px) => px,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MinContactRepr {
    Flag(bool),
    Px(f64),
}

impl TryFrom<MinContactRepr> for MinContact {
    type Error = String;

    fn try_from(repr: MinContactRepr) -> Result<Self, Self::Error> {
        match repr {
            MinContactRepr::Flag(false) => Ok(MinContact::Auto),
            MinContactRepr::Flag(true) => {
                Err("min_contact must be `false` or a number of pixels".to_string())
            }
            MinContactRepr::Px(px) => Ok(MinContact::Px(px)),
        }
    }
}

/// Plain-data positioning options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PositionerConfig {
    /// Requested side of the reference
    pub placement: Placement,

    /// Cross-axis alignment, logical until the side is resolved
    pub position: Position,

    /// Writing direction used to map `position` onto physical sides
    pub direction: TextDirection,

    /// Skip flipping and use the requested side verbatim (unless `auto`)
    pub fixed: bool,

    /// Gap between the reference and the floating box
    pub spacing: f64,

    /// Minimum overlap with the reference kept while clamping
    pub min_contact: MinContact,

    /// Apply the offset as a transform (true) or as margins (false)
    pub use_gpu: bool,

    /// Suppress reporting the resolved placement as an element attribute
    pub no_attributes: bool,
}

impl Default for PositionerConfig {
    fn default() -> Self {
        Self {
            placement: Placement::Bottom,
            position: Position::Center,
            direction: TextDirection::Ltr,
            fixed: false,
            spacing: 0.0,
            min_contact: MinContact::Auto,
            use_gpu: true,
            no_attributes: false,
        }
    }
}

impl PositionerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_min_contact(mut self, min_contact: MinContact) -> Self {
        self.min_contact = min_contact;
        self
    }

    pub fn with_gpu(mut self, use_gpu: bool) -> Self {
        self.use_gpu = use_gpu;
        self
    }

    pub fn with_no_attributes(mut self, no_attributes: bool) -> Self {
        self.no_attributes = no_attributes;
        self
    }
}

/// Error type returned by lifecycle hooks
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Hook run before measuring: `(node, reference)`
pub type BeforeUpdate = Box<dyn FnMut(ElementId, ElementId) -> Result<(), HookError>>;

/// Hook run after applying: `(node, reference, placement, position)`
pub type AfterUpdate =
    Box<dyn FnMut(ElementId, ElementId, Side, Position) -> Result<(), HookError>>;

/// Optional lifecycle callbacks, invoked synchronously inside `update`
#[derive(Default)]
pub struct Hooks {
    pub before_update: Option<BeforeUpdate>,
    pub after_update: Option<AfterUpdate>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_update", &self.before_update.is_some())
            .field("after_update", &self.after_update.is_some())
            .finish()
    }
}

/// Everything a positioner instance needs besides the floating node itself
#[derive(Debug, Default)]
pub struct Settings {
    /// Element the floating box is anchored to (required)
    pub reference: Option<ElementId>,
    /// Explicit constraint container
    pub container: Option<ElementId>,
    /// Arrow sub-element inside the floating box
    pub arrow: Option<ElementId>,
    pub config: PositionerConfig,
    pub hooks: Hooks,
}

impl Settings {
    /// Settings anchored to `reference` with default options
    pub fn new(reference: ElementId) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    pub fn with_container(mut self, container: ElementId) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_arrow(mut self, arrow: ElementId) -> Self {
        self.arrow = Some(arrow);
        self
    }

    pub fn with_config(mut self, config: PositionerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn before_update(
        mut self,
        hook: impl FnMut(ElementId, ElementId) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.hooks.before_update = Some(Box::new(hook));
        self
    }

    pub fn after_update(
        mut self,
        hook: impl FnMut(ElementId, ElementId, Side, Position) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.hooks.after_update = Some(Box::new(hook));
        self
    }
}
