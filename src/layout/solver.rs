//! A reference layout engine backed by the kasuari Cassowary solver
//!
//! Every target gets four solver variables (x, y, width, height). Edges and centers
//! are derived expressions over them, so a descriptor such as
//! `b.leading == a.trailing + 8` becomes `b.x - (a.x + a.width) == 8`.

use std::collections::{HashMap, HashSet};

use kasuari::{
    Constraint as KasuariConstraint, Expression, Solver as KasuariSolver, Strength,
    Variable as KasuariVariable, WeightedRelation::*,
};
use log::trace;
use thiserror::Error;

use super::descriptor::{ConstraintDescriptor, DescriptorId};
use super::engine::{EngineError, LayoutEngine};
use super::types::{Anchor, Attribute, Frame, Priority, Relation, Target, TargetId};

// ============================================================================
// Errors
// ============================================================================

/// Errors from the constraint solver
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Unsatisfiable constraint {descriptor}: {reason}")]
    Unsatisfiable { descriptor: String, reason: String },

    #[error("Internal solver error: {0}")]
    Internal(String),
}

/// Convert a kasuari error to a SolverError with context
fn convert_kasuari_error(e: kasuari::AddConstraintError, description: &str) -> SolverError {
    match e {
        kasuari::AddConstraintError::UnsatisfiableConstraint => SolverError::Unsatisfiable {
            descriptor: description.to_string(),
            reason: "conflicts with existing required constraints".to_string(),
        },
        kasuari::AddConstraintError::DuplicateConstraint => {
            SolverError::Internal(format!("Duplicate constraint: {}", description))
        }
        kasuari::AddConstraintError::InternalSolverError(msg) => {
            SolverError::Internal(format!("Internal solver error for {}: {}", description, msg))
        }
    }
}

/// Map a 0..=1000 priority onto kasuari's strength bands
pub fn strength_for(priority: Priority) -> Strength {
    let value = priority.value();
    if value >= Priority::REQUIRED.value() {
        Strength::REQUIRED
    } else if value >= Priority::HIGH.value() {
        Strength::STRONG
    } else if value >= Priority::LOW.value() {
        Strength::MEDIUM
    } else {
        Strength::WEAK
    }
}

// ============================================================================
// Variables
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct TargetVariables {
    x: KasuariVariable,
    y: KasuariVariable,
    width: KasuariVariable,
    height: KasuariVariable,
}

impl TargetVariables {
    fn new() -> Self {
        Self {
            x: KasuariVariable::new(),
            y: KasuariVariable::new(),
            width: KasuariVariable::new(),
            height: KasuariVariable::new(),
        }
    }

    /// Expression for an anchor attribute; leading/trailing are left-to-right
    fn expression(&self, attribute: Attribute) -> Expression {
        match attribute {
            Attribute::Left | Attribute::Leading => self.x.into(),
            Attribute::Top => self.y.into(),
            Attribute::Width => self.width.into(),
            Attribute::Height => self.height.into(),
            Attribute::Right | Attribute::Trailing => self.x + self.width,
            Attribute::Bottom => self.y + self.height,
            Attribute::CenterX => self.x + self.width * 0.5,
            Attribute::CenterY => self.y + self.height * 0.5,
        }
    }
}

// ============================================================================
// KasuariEngine
// ============================================================================

/// A [`LayoutEngine`] that enacts descriptors as Cassowary constraints
pub struct KasuariEngine {
    solver: KasuariSolver,
    variables: HashMap<TargetId, TargetVariables>,
    /// Container each added target was placed in
    containers: HashMap<TargetId, TargetId>,
    /// Required constraints pinning each root's frame
    roots: HashMap<TargetId, Vec<KasuariConstraint>>,
    active: HashMap<DescriptorId, KasuariConstraint>,
    edit_variables: HashSet<KasuariVariable>,
    values: HashMap<KasuariVariable, f64>,
    stale: HashSet<TargetId>,
}

impl KasuariEngine {
    pub fn new() -> Self {
        Self {
            solver: KasuariSolver::new(),
            variables: HashMap::new(),
            containers: HashMap::new(),
            roots: HashMap::new(),
            active: HashMap::new(),
            edit_variables: HashSet::new(),
            values: HashMap::new(),
            stale: HashSet::new(),
        }
    }

    /// Create variables for a target, with non-negative size
    fn register(&mut self, id: &TargetId) -> Result<TargetVariables, SolverError> {
        if let Some(vars) = self.variables.get(id) {
            return Ok(*vars);
        }

        let vars = TargetVariables::new();
        let description = format!("{}.size >= 0", id);
        self.solver
            .add_constraint(Expression::from(vars.width) | GE(Strength::REQUIRED) | 0.0)
            .map_err(|e| convert_kasuari_error(e, &description))?;
        self.solver
            .add_constraint(Expression::from(vars.height) | GE(Strength::REQUIRED) | 0.0)
            .map_err(|e| convert_kasuari_error(e, &description))?;
        self.variables.insert(id.clone(), vars);
        Ok(vars)
    }

    /// Pin `root` to `frame` with required constraints
    ///
    /// Calling this again for the same root replaces its frame.
    pub fn add_root(&mut self, root: &Target, frame: Frame) -> Result<(), EngineError> {
        let vars = self.register(root.id())?;

        if let Some(previous) = self.roots.remove(root.id()) {
            for constraint in &previous {
                self.solver.remove_constraint(constraint).map_err(|e| {
                    SolverError::Internal(format!("Failed to unpin root {}: {:?}", root.id(), e))
                })?;
            }
        }

        let pins = vec![
            Expression::from(vars.x) | EQ(Strength::REQUIRED) | frame.x,
            Expression::from(vars.y) | EQ(Strength::REQUIRED) | frame.y,
            Expression::from(vars.width) | EQ(Strength::REQUIRED) | frame.width,
            Expression::from(vars.height) | EQ(Strength::REQUIRED) | frame.height,
        ];
        let description = format!("{} root frame", root.id());
        for constraint in &pins {
            self.solver
                .add_constraint(constraint.clone())
                .map_err(|e| convert_kasuari_error(e, &description))?;
        }
        self.roots.insert(root.id().clone(), pins);
        self.stale.insert(root.id().clone());
        Ok(())
    }

    /// Suggest an intrinsic size for `target`, held with strong strength
    pub fn suggest_size(&mut self, target: &Target, width: f64, height: f64) -> Result<(), EngineError> {
        let vars = *self
            .variables
            .get(target.id())
            .ok_or_else(|| EngineError::unknown_target(target.id()))?;

        for (var, value) in [(vars.width, width), (vars.height, height)] {
            if self.edit_variables.insert(var) {
                self.solver
                    .add_edit_variable(var, Strength::STRONG)
                    .map_err(|e| SolverError::Internal(format!("Failed to add edit variable: {}", e)))?;
            }
            self.solver
                .suggest_value(var, value)
                .map_err(|e| SolverError::Internal(format!("Failed to suggest value: {}", e)))?;
        }
        self.stale.insert(target.id().clone());
        Ok(())
    }

    /// The container `target` was added to, if any
    pub fn container_of(&self, target: &Target) -> Option<&TargetId> {
        self.containers.get(target.id())
    }

    pub fn is_active(&self, descriptor: &ConstraintDescriptor) -> bool {
        self.active.contains_key(&descriptor.id())
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn needs_layout(&self, target: &Target) -> bool {
        self.stale.contains(target.id())
    }

    /// Pull the current solution out of the solver and clear all staleness
    pub fn layout(&mut self) {
        let changes = self.solver.fetch_changes();
        for (var, value) in changes {
            self.values.insert(*var, *value);
        }
        self.stale.clear();
    }

    /// The solved frame of `target` as of the last [`KasuariEngine::layout`]
    pub fn frame(&self, target: &Target) -> Option<Frame> {
        let vars = self.variables.get(target.id())?;
        let value = |var: &KasuariVariable| self.values.get(var).copied().unwrap_or(0.0);
        Some(Frame::new(
            value(&vars.x),
            value(&vars.y),
            value(&vars.width),
            value(&vars.height),
        ))
    }

    fn anchor_expression(
        &self,
        anchor: &Anchor,
        descriptor: &ConstraintDescriptor,
    ) -> Result<Expression, EngineError> {
        self.variables
            .get(&anchor.target)
            .map(|vars| vars.expression(anchor.attribute))
            .ok_or_else(|| EngineError::unregistered_target(&anchor.target, descriptor))
    }

    /// Build `first - multiplier * second <relation> constant`
    fn build_constraint(&self, descriptor: &ConstraintDescriptor) -> Result<KasuariConstraint, EngineError> {
        let first = self.anchor_expression(&descriptor.first, descriptor)?;
        let lhs = match &descriptor.second {
            Some(second) => {
                let second = self.anchor_expression(second, descriptor)?;
                first - second * descriptor.multiplier
            }
            None => first,
        };

        let strength = strength_for(descriptor.priority);
        let constant = descriptor.constant;
        Ok(match descriptor.relation {
            Relation::Equal => lhs | EQ(strength) | constant,
            Relation::AtLeast => lhs | GE(strength) | constant,
            Relation::AtMost => lhs | LE(strength) | constant,
        })
    }

    fn activate_one(&mut self, descriptor: &ConstraintDescriptor) -> Result<(), EngineError> {
        let constraint = self.build_constraint(descriptor)?;
        self.solver
            .add_constraint(constraint.clone())
            .map_err(|e| convert_kasuari_error(e, &descriptor.to_string()))?;
        trace!("activated {}", descriptor);
        self.active.insert(descriptor.id(), constraint);
        Ok(())
    }

    fn deactivate_one(&mut self, id: DescriptorId) -> Result<(), SolverError> {
        if let Some(constraint) = self.active.remove(&id) {
            self.solver
                .remove_constraint(&constraint)
                .map_err(|e| SolverError::Internal(format!("Failed to remove constraint: {:?}", e)))?;
        }
        Ok(())
    }
}

impl Default for KasuariEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for KasuariEngine {
    fn add_to_container(&mut self, target: &Target, container: &Target) -> Result<(), EngineError> {
        self.register(container.id())?;
        self.register(target.id())?;
        self.containers
            .insert(target.id().clone(), container.id().clone());
        Ok(())
    }

    /// Activation is all-or-nothing: on error, descriptors added by this call are
    /// removed again
    fn activate(&mut self, descriptors: &[ConstraintDescriptor]) -> Result<(), EngineError> {
        let mut added = Vec::new();
        for descriptor in descriptors {
            if self.active.contains_key(&descriptor.id()) {
                continue;
            }
            if let Err(e) = self.activate_one(descriptor) {
                for id in added {
                    self.deactivate_one(id)?;
                }
                return Err(e);
            }
            added.push(descriptor.id());
        }
        Ok(())
    }

    fn deactivate(&mut self, descriptors: &[ConstraintDescriptor]) -> Result<(), EngineError> {
        for descriptor in descriptors {
            if self.active.contains_key(&descriptor.id()) {
                self.deactivate_one(descriptor.id())?;
                trace!("deactivated {}", descriptor);
            }
        }
        Ok(())
    }

    fn mark_needs_layout(&mut self, target: &Target) {
        self.stale.insert(target.id().clone());
    }
}
