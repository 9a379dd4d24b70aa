//! Registry of live positioners and the debounced resize/scroll refresh
//!
//! The registry owns every positioner by handle. Resize and scroll
//! notifications only mark instances as pending; the host calls [`Registry::flush`]
//! once per animation tick, which recomputes each pending instance exactly once.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::{debug, trace};

use crate::error::PositionError;
use crate::host::{ElementId, LayoutHost, ScrollbarCache};
use crate::instance::{Positioner, UpdateOutcome};
use crate::settings::Settings;

/// Stable handle for a registered positioner
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "positioner-{}", self.0)
    }
}

/// Listener bookkeeping the host must mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChange {
    /// Attach the window resize listener and the capture-phase scroll listener
    Attach,
    /// Detach both listeners
    Detach,
}

/// Where a scroll event originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Document,
    Element(ElementId),
}

/// Result of registering a positioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id: InstanceId,
    pub listeners: Option<ListenerChange>,
}

/// Owned collection of live positioners
#[derive(Debug, Default)]
pub struct Registry {
    instances: BTreeMap<InstanceId, Positioner>,
    pending: BTreeSet<InstanceId>,
    next_id: u64,
    listening: bool,
    scrollbar: ScrollbarCache,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a positioner for `node` and register it
    pub fn create(
        &mut self,
        node: ElementId,
        settings: Settings,
    ) -> Result<Registration, PositionError> {
        let positioner = Positioner::new(node, settings)?;
        Ok(self.add(positioner))
    }

    /// Register an existing positioner
    pub fn add(&mut self, positioner: Positioner) -> Registration {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        trace!("registering {} for {}", id, positioner.node());
        self.instances.insert(id, positioner);

        let listeners = if self.listening {
            None
        } else {
            debug!("first positioner registered, attaching listeners");
            self.listening = true;
            Some(ListenerChange::Attach)
        };
        Registration { id, listeners }
    }

    /// Dispose of a positioner; disposing twice is a no-op.
    ///
    /// The instance also leaves any pending batch.
    pub fn dispose(&mut self, id: InstanceId) -> Option<ListenerChange> {
        self.instances.remove(&id)?;
        self.pending.remove(&id);
        trace!("disposed {}", id);

        if self.instances.is_empty() && self.listening {
            debug!("last positioner disposed, detaching listeners");
            self.listening = false;
            Some(ListenerChange::Detach)
        } else {
            None
        }
    }

    pub fn get(&self, id: InstanceId) -> Option<&Positioner> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Positioner> {
        self.instances.get_mut(&id)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether the resize and scroll listeners should currently be attached
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Handles in registration order
    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        self.instances.keys().copied()
    }

    /// Update one positioner immediately
    pub fn update<H: LayoutHost + ?Sized>(
        &mut self,
        id: InstanceId,
        host: &mut H,
    ) -> Result<UpdateOutcome, PositionError> {
        let positioner = self
            .instances
            .get_mut(&id)
            .ok_or(PositionError::UnknownInstance(id))?;
        self.pending.remove(&id);
        positioner.update(host, &self.scrollbar)
    }

    /// Defer an instance's update to the next tick, e.g. right after its
    /// floating box was inserted and has not been laid out yet
    pub fn schedule(&mut self, id: InstanceId) -> Result<(), PositionError> {
        if !self.instances.contains_key(&id) {
            return Err(PositionError::UnknownInstance(id));
        }
        self.pending.insert(id);
        Ok(())
    }

    /// Window resized: every instance needs a refresh
    pub fn notify_resize(&mut self) {
        self.pending.extend(self.instances.keys().copied());
    }

    /// Something scrolled: refresh the instances whose floating box lives
    /// inside the scrolled element, or all of them for document scrolls
    pub fn notify_scroll<H: LayoutHost + ?Sized>(&mut self, target: ScrollTarget, host: &H) {
        let affected = self.instances.iter().filter(|(_, positioner)| match target {
            ScrollTarget::Document => true,
            ScrollTarget::Element(element) => host.contains(element, positioner.node()),
        });
        self.pending.extend(affected.map(|(id, _)| *id));
    }

    /// Whether any instance awaits the next tick
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_pending(&self, id: InstanceId) -> bool {
        self.pending.contains(&id)
    }

    /// Run one tick: update every pending instance once, in registration order.
    ///
    /// On a hook failure the remaining instances stay pending for the next
    /// tick and the error is returned.
    pub fn flush<H: LayoutHost + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Result<Vec<(InstanceId, UpdateOutcome)>, PositionError> {
        let batch = std::mem::take(&mut self.pending);
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        debug!("flushing {} pending positioner(s)", batch.len());

        let mut outcomes = Vec::with_capacity(batch.len());
        let mut remaining = batch.into_iter();
        while let Some(id) = remaining.next() {
            let Some(positioner) = self.instances.get_mut(&id) else {
                continue;
            };
            match positioner.update(host, &self.scrollbar) {
                Ok(outcome) => outcomes.push((id, outcome)),
                Err(err) => {
                    self.pending.extend(remaining);
                    return Err(err);
                }
            }
        }
        Ok(outcomes)
    }
}
