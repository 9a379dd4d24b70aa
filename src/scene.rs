//! In-memory layout host
//!
//! A `Scene` is a small element tree with fixed rects that implements
//! [`LayoutHost`]. It simulates what a browser would report after the
//! positioner writes styles: transforms and margins move the measured box,
//! and scrolling an ancestor moves everything inside it. Scenes can be built
//! in code or loaded from TOML:
//!
//! ```toml
//! scrollbar_thickness = 15
//!
//! [viewport]
//! width = 800
//! height = 600
//!
//! [[element]]
//! name = "button"
//! rect = { left = 100, top = 100, width = 80, height = 30 }
//!
//! [[element]]
//! name = "tooltip"
//! rect = { width = 120, height = 40 }
//!
//! [[float]]
//! node = "tooltip"
//! reference = "button"
//! placement = "top"
//! spacing = 8
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::PositionError;
use crate::geometry::{Edges, Point, Rect};
use crate::host::{ElementId, LayoutHost, Scrollbars, Viewport};
use crate::settings::{PositionerConfig, Settings, Side};
use crate::style::{ArrowStyle, NodeStyle};

/// Errors that can occur when loading or using a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("element '{name}' is defined more than once")]
    DuplicateElement { name: String },
    #[error("unknown element '{name}'")]
    UnknownElement { name: String },
    #[error(transparent)]
    Position(#[from] PositionError),
}

/// One element of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    /// Layout box at zero scroll, without margins or applied offsets
    pub rect: Rect,
    pub parent: Option<ElementId>,
    /// `position: relative`
    pub relative: bool,
    /// `overflow: auto | scroll`
    pub scrollable: bool,
    pub scroll: Point,
    pub scrollbars: Scrollbars,
    pub margin: Edges,
    /// `position: fixed`
    pub fixed: bool,
    pub hidden: bool,
    pub connected: bool,
}

impl SceneElement {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            parent: None,
            relative: false,
            scrollable: false,
            scroll: Point::default(),
            scrollbars: Scrollbars::default(),
            margin: Edges::default(),
            fixed: false,
            hidden: false,
            connected: true,
        }
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn relative(mut self) -> Self {
        self.relative = true;
        self
    }

    pub fn scrollable(mut self, scrollbars: Scrollbars) -> Self {
        self.scrollable = true;
        self.scrollbars = scrollbars;
        self
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }
}

/// `[[element]]` entry of a scene document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    name: String,
    #[serde(default)]
    rect: Rect,
    parent: Option<String>,
    #[serde(default)]
    relative: bool,
    #[serde(default)]
    scrollable: bool,
    #[serde(default)]
    scroll: Point,
    #[serde(default)]
    scrollbars: Scrollbars,
    #[serde(default)]
    margin: Edges,
    #[serde(default)]
    fixed: bool,
    #[serde(default)]
    hidden: bool,
    #[serde(default = "default_connected")]
    connected: bool,
}

fn default_connected() -> bool {
    true
}

/// `[[float]]` entry of a scene document: one positioner to create
#[derive(Debug, Clone, Deserialize)]
pub struct FloatEntry {
    pub node: String,
    pub reference: Option<String>,
    pub container: Option<String>,
    pub arrow: Option<String>,
    #[serde(flatten)]
    pub config: PositionerConfig,
}

#[derive(Debug, Deserialize)]
struct SceneDocument {
    #[serde(default)]
    viewport: Viewport,
    #[serde(default)]
    scrollbar_thickness: f64,
    #[serde(default)]
    element: Vec<ElementEntry>,
    #[serde(default)]
    float: Vec<FloatEntry>,
}

/// In-memory element tree implementing [`LayoutHost`]
#[derive(Debug, Clone, Default)]
pub struct Scene {
    viewport: Viewport,
    scrollbar_thickness: f64,
    elements: Vec<SceneElement>,
    names: HashMap<String, ElementId>,
    floats: Vec<FloatEntry>,
    styles: HashMap<ElementId, NodeStyle>,
    arrow_styles: HashMap<ElementId, ArrowStyle>,
    attributes: HashMap<ElementId, Side>,
}

impl Scene {
    /// Create an empty scene with the given window
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SceneError> {
        let document: SceneDocument = toml::from_str(content)?;
        let mut scene = Scene::new(document.viewport)
            .with_scrollbar_thickness(document.scrollbar_thickness);

        // Parents may be declared after their children, so resolve names first
        for entry in &document.element {
            if scene.names.contains_key(&entry.name) {
                return Err(SceneError::DuplicateElement {
                    name: entry.name.clone(),
                });
            }
            let id = ElementId(scene.elements.len() as u64);
            scene.names.insert(entry.name.clone(), id);
            scene.elements.push(SceneElement::new(entry.rect));
        }

        for (index, entry) in document.element.into_iter().enumerate() {
            let parent = entry
                .parent
                .as_deref()
                .map(|name| scene.lookup(name))
                .transpose()?;
            scene.elements[index] = SceneElement {
                rect: entry.rect,
                parent,
                relative: entry.relative,
                scrollable: entry.scrollable,
                scroll: entry.scroll,
                scrollbars: entry.scrollbars,
                margin: entry.margin,
                fixed: entry.fixed,
                hidden: entry.hidden,
                connected: entry.connected,
            };
        }

        scene.floats = document.float;
        Ok(scene)
    }

    pub fn with_scrollbar_thickness(mut self, thickness: f64) -> Self {
        self.scrollbar_thickness = thickness;
        self
    }

    /// Add an element and return its handle
    pub fn add(&mut self, name: impl Into<String>, element: SceneElement) -> ElementId {
        let id = ElementId(self.elements.len() as u64);
        self.elements.push(element);
        self.names.insert(name.into(), id);
        id
    }

    /// Handle of a named element
    pub fn id(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Name of an element
    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, candidate)| **candidate == id)
            .map(|(name, _)| name.as_str())
    }

    fn lookup(&self, name: &str) -> Result<ElementId, SceneError> {
        self.id(name).ok_or_else(|| SceneError::UnknownElement {
            name: name.to_string(),
        })
    }

    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.get(id.0 as usize)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        self.elements.get_mut(id.0 as usize)
    }

    /// Positioners declared by the scene document
    pub fn floats(&self) -> &[FloatEntry] {
        &self.floats
    }

    /// Resolve a `[[float]]` entry into a node handle and settings
    pub fn settings_for(&self, entry: &FloatEntry) -> Result<(ElementId, Settings), SceneError> {
        let node = self.lookup(&entry.node)?;
        let settings = Settings {
            reference: entry.reference.as_deref().map(|n| self.lookup(n)).transpose()?,
            container: entry.container.as_deref().map(|n| self.lookup(n)).transpose()?,
            arrow: entry.arrow.as_deref().map(|n| self.lookup(n)).transpose()?,
            config: entry.config.clone(),
            ..Settings::default()
        };
        Ok((node, settings))
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Scroll the document
    pub fn scroll_document(&mut self, to: Point) {
        self.viewport.scroll = to;
    }

    /// Scroll an element's content
    pub fn scroll_element(&mut self, id: ElementId, to: Point) {
        if let Some(element) = self.element_mut(id) {
            element.scroll = to;
        }
    }

    /// Style last applied to a floating box
    pub fn style(&self, id: ElementId) -> Option<&NodeStyle> {
        self.styles.get(&id)
    }

    /// Style last applied to an arrow
    pub fn arrow_style(&self, id: ElementId) -> Option<&ArrowStyle> {
        self.arrow_styles.get(&id)
    }

    /// Placement attribute last written to an element
    pub fn placement_attribute(&self, id: ElementId) -> Option<Side> {
        self.attributes.get(&id).copied()
    }

    fn ancestors(&self, id: ElementId) -> impl Iterator<Item = (ElementId, &SceneElement)> + '_ {
        let mut next = self.element(id).and_then(|e| e.parent);
        std::iter::from_fn(move || {
            let current = next?;
            let element = self.element(current)?;
            next = element.parent;
            Some((current, element))
        })
    }
}

impl LayoutHost for Scene {
    fn measure(&self, element: ElementId) -> Rect {
        let Some(entry) = self.element(element) else {
            return Rect::default();
        };

        let rect = self
            .ancestors(element)
            .filter(|(_, ancestor)| ancestor.scrollable)
            .fold(entry.rect, |rect, (_, ancestor)| {
                rect.translate(-ancestor.scroll.x, -ancestor.scroll.y)
            });

        match self.styles.get(&element) {
            Some(NodeStyle::Transform(o)) => rect.translate(
                entry.margin.left + f64::from(o.x),
                entry.margin.top + f64::from(o.y),
            ),
            Some(NodeStyle::Margin(o)) => rect.translate(f64::from(o.x), f64::from(o.y)),
            None => rect.translate(entry.margin.left, entry.margin.top),
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scrollbar_thickness(&self) -> f64 {
        self.scrollbar_thickness
    }

    fn relative_parent(&self, element: ElementId) -> Option<ElementId> {
        self.ancestors(element)
            .find(|(_, ancestor)| ancestor.relative)
            .map(|(id, _)| id)
    }

    fn scroll_parent(&self, element: ElementId) -> Option<ElementId> {
        self.ancestors(element)
            .find(|(_, ancestor)| ancestor.relative && ancestor.scrollable)
            .map(|(id, _)| id)
    }

    fn scroll_offsets(&self, element: ElementId) -> Point {
        self.element(element).map(|e| e.scroll).unwrap_or_default()
    }

    fn scrollbars(&self, element: ElementId) -> Scrollbars {
        self.element(element).map(|e| e.scrollbars).unwrap_or_default()
    }

    fn margins(&self, element: ElementId) -> Edges {
        self.element(element).map(|e| e.margin).unwrap_or_default()
    }

    fn is_connected_and_visible(&self, element: ElementId) -> bool {
        let Some(entry) = self.element(element) else {
            return false;
        };
        let chain_ok = entry.connected
            && !entry.hidden
            && self
                .ancestors(element)
                .all(|(_, ancestor)| ancestor.connected && !ancestor.hidden);
        chain_ok && !entry.rect.is_empty()
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        ancestor == element || self.ancestors(element).any(|(id, _)| id == ancestor)
    }

    fn is_fixed(&self, element: ElementId) -> bool {
        self.element(element).map(|e| e.fixed).unwrap_or(false)
    }

    fn apply_style(&mut self, element: ElementId, style: &NodeStyle) {
        self.styles.insert(element, *style);
    }

    fn apply_arrow_style(&mut self, arrow: ElementId, style: &ArrowStyle) {
        self.arrow_styles.insert(arrow, *style);
    }

    fn set_placement_attribute(&mut self, element: ElementId, side: Side) {
        self.attributes.insert(element, side);
    }
}
