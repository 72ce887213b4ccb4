//! The host layout engine boundary
//!
//! A restraint never solves anything itself. It hands resolved descriptors to a
//! [`LayoutEngine`], which owns the container tree and enacts the constraints.

use thiserror::Error;

use super::descriptor::ConstraintDescriptor;
use super::solver::SolverError;
use super::types::{Target, TargetId};

/// Errors reported by a layout engine while enacting descriptors
#[derive(Debug, Error)]
pub enum EngineError {
    /// A descriptor references a target the engine has never registered, either as a
    /// root or by adding it to a container
    #[error("target '{target}' is not registered (referenced by {descriptor})")]
    UnregisteredTarget { target: String, descriptor: String },

    /// An engine operation named a target the engine has never seen
    #[error("unknown target '{target}'")]
    UnknownTarget { target: String },

    /// The underlying solver rejected a constraint
    #[error("constraint solver error: {0}")]
    Solver(#[from] SolverError),
}

impl EngineError {
    /// Create an unregistered target error for `target`, referenced by `descriptor`
    pub fn unregistered_target(target: &TargetId, descriptor: &ConstraintDescriptor) -> Self {
        Self::UnregisteredTarget {
            target: target.to_string(),
            descriptor: descriptor.to_string(),
        }
    }

    /// Create an unknown target error
    pub fn unknown_target(target: &TargetId) -> Self {
        Self::UnknownTarget {
            target: target.to_string(),
        }
    }
}

/// Services a restraint consumes from the host layout engine
pub trait LayoutEngine {
    /// Make `target` participate in `container`'s layout
    ///
    /// Must happen before any descriptor referencing `target` is activated. Adding a
    /// target that is already in `container` is a no-op.
    fn add_to_container(&mut self, target: &Target, container: &Target) -> Result<(), EngineError>;

    /// Enact `descriptors`; already active descriptors are left as they are
    ///
    /// On error, no descriptor that this call activated should remain active.
    fn activate(&mut self, descriptors: &[ConstraintDescriptor]) -> Result<(), EngineError>;

    /// Stop enacting `descriptors`; inactive descriptors are ignored
    fn deactivate(&mut self, descriptors: &[ConstraintDescriptor]) -> Result<(), EngineError>;

    /// Signal that `target`'s layout is stale
    fn mark_needs_layout(&mut self, target: &Target);
}
