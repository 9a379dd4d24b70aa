//! Error types for positioner construction and updates

use thiserror::Error;

use crate::registry::InstanceId;
use crate::settings::HookError;

/// Errors that can occur while creating or updating positioners
#[derive(Debug, Error)]
pub enum PositionError {
    /// Settings did not name a reference element
    #[error("positioner for {node} has no reference element")]
    MissingReference { node: String },

    /// A `before_update` or `after_update` hook failed
    #[error("{stage} hook failed: {source}")]
    Hook {
        stage: HookStage,
        #[source]
        source: HookError,
    },

    /// Handle does not belong to a live instance
    #[error("unknown positioner instance {0}")]
    UnknownInstance(InstanceId),
}

/// Which lifecycle hook raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    BeforeUpdate,
    AfterUpdate,
}

impl std::fmt::Display for HookStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookStage::BeforeUpdate => f.write_str("before_update"),
            HookStage::AfterUpdate => f.write_str("after_update"),
        }
    }
}

impl PositionError {
    /// Create a missing reference error
    pub fn missing_reference(node: impl std::fmt::Display) -> Self {
        Self::MissingReference {
            node: node.to_string(),
        }
    }

    /// Wrap a hook failure
    pub fn hook(stage: HookStage, source: HookError) -> Self {
        Self::Hook { stage, source }
    }

    /// Whether this error came from a caller-supplied hook
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook { .. })
    }
}
