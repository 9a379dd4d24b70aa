//! A live positioner bound to one floating element

use log::{debug, trace};

use crate::error::{HookStage, PositionError};
use crate::geometry::{Edges, Offset, Rect};
use crate::host::{ElementId, LayoutHost, ScrollbarCache};
use crate::positioner::{
    arrow_offset, compute, minimum_box, scroll_container_box, viewport_box, ArrowInput,
    PositionInput,
};
use crate::settings::{Hooks, Position, PositionerConfig, Settings, Side};
use crate::style::{ArrowStyle, NodeStyle};

/// Outcome of one successful positioning pass
#[derive(Debug, Clone, PartialEq)]
pub struct PositionResult {
    /// Resolved side of the reference
    pub placement: Side,
    /// Physical cross-axis alignment used
    pub position: Position,
    /// Integer offset written to the floating box
    pub offset: Offset,
    /// Style written to the floating box
    pub style: NodeStyle,
    /// Arrow style, when an arrow is configured
    pub arrow: Option<ArrowStyle>,
    /// Constraint box the floating box was kept inside
    pub minimum_box: Rect,
    /// Placement reported as an attribute, unless attributes are disabled
    pub placement_attribute: Option<Side>,
}

/// What `update` did
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Node was disconnected or hidden; the previous offset stays in place
    Skipped,
    Applied(PositionResult),
}

impl UpdateOutcome {
    pub fn result(&self) -> Option<&PositionResult> {
        match self {
            UpdateOutcome::Skipped => None,
            UpdateOutcome::Applied(result) => Some(result),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, UpdateOutcome::Skipped)
    }
}

/// Positioner instance for one floating element
#[derive(Debug)]
pub struct Positioner {
    node: ElementId,
    reference: ElementId,
    container: Option<ElementId>,
    arrow: Option<ElementId>,
    config: PositionerConfig,
    hooks: Hooks,
    last: Option<PositionResult>,
}

impl Positioner {
    /// Create a positioner for `node`.
    ///
    /// Fails when the settings do not name a reference element.
    pub fn new(node: ElementId, settings: Settings) -> Result<Self, PositionError> {
        let Settings {
            reference,
            container,
            arrow,
            config,
            hooks,
        } = settings;
        let reference = reference.ok_or_else(|| PositionError::missing_reference(node))?;
        Ok(Self {
            node,
            reference,
            container,
            arrow,
            config,
            hooks,
            last: None,
        })
    }

    pub fn node(&self) -> ElementId {
        self.node
    }

    pub fn reference(&self) -> ElementId {
        self.reference
    }

    pub fn config(&self) -> &PositionerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut PositionerConfig {
        &mut self.config
    }

    /// Result of the last applied update
    pub fn last_result(&self) -> Option<&PositionResult> {
        self.last.as_ref()
    }

    /// Recompute and apply the floating box position.
    ///
    /// Skips without error when the node is disconnected or hidden. Hook
    /// failures abort the pass and are returned to the caller; an
    /// `after_update` failure still leaves the applied result recorded in
    /// [`Positioner::last_result`].
    pub fn update<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        scrollbar: &ScrollbarCache,
    ) -> Result<UpdateOutcome, PositionError> {
        if !host.is_connected_and_visible(self.node) {
            debug!("skipping update for {}: not connected or not visible", self.node);
            return Ok(UpdateOutcome::Skipped);
        }

        if let Some(hook) = self.hooks.before_update.as_mut() {
            hook(self.node, self.reference)
                .map_err(|e| PositionError::hook(HookStage::BeforeUpdate, e))?;
        }

        let node_box = host.measure(self.node);
        let reference_box = host.measure(self.reference);

        let thickness = scrollbar.get_or_measure(&*host);
        let window = viewport_box(&host.viewport(), thickness, host.is_fixed(self.node));
        let scroll_parent = host.scroll_parent(self.node);
        let scroll_box = scroll_parent.map(|parent| {
            scroll_container_box(host.measure(parent), host.scrollbars(parent), thickness)
        });
        let container_box = self.container.map(|container| host.measure(container));
        let minimum = minimum_box(window, scroll_box, container_box);

        let relative_origin = host
            .relative_parent(self.node)
            .map(|parent| host.measure(parent).origin())
            .unwrap_or_default();
        // Margins only shift a transformed box; the margin path overwrites them
        let margins = if self.config.use_gpu {
            host.margins(self.node)
        } else {
            Edges::default()
        };
        let scroll = scroll_parent
            .map(|parent| host.scroll_offsets(parent))
            .unwrap_or_default();

        let computed = compute(&PositionInput {
            node: &node_box,
            reference: &reference_box,
            minimum: &minimum,
            config: &self.config,
            relative_origin,
            margins,
            scroll,
        });
        trace!(
            "{} placed {} of {} at {:?} within {:?}",
            self.node,
            computed.side,
            self.reference,
            computed.offset,
            minimum
        );

        let style = NodeStyle::new(computed.offset, self.config.use_gpu);
        host.apply_style(self.node, &style);

        let placement_attribute = if self.config.no_attributes {
            None
        } else {
            host.set_placement_attribute(self.node, computed.side);
            host.set_placement_attribute(self.reference, computed.side);
            Some(computed.side)
        };

        let arrow = self.arrow.map(|arrow| {
            let moved = host.measure(self.node);
            let arrow_box = host.measure(arrow);
            let arrow_style = arrow_offset(&ArrowInput {
                node: &moved,
                reference: &reference_box,
                arrow: &arrow_box,
                side: computed.side,
                position: computed.position,
            });
            host.apply_arrow_style(arrow, &arrow_style);
            arrow_style
        });

        // The host already shows this result, even if the hook below fails
        let result = PositionResult {
            placement: computed.side,
            position: computed.position,
            offset: computed.offset,
            style,
            arrow,
            minimum_box: minimum,
            placement_attribute,
        };
        self.last = Some(result.clone());

        if let Some(hook) = self.hooks.after_update.as_mut() {
            hook(self.node, self.reference, computed.side, computed.position)
                .map_err(|e| PositionError::hook(HookStage::AfterUpdate, e))?;
        }

        Ok(UpdateOutcome::Applied(result))
    }
}
