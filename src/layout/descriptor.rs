//! The atomic constraint record handed to a layout engine

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use super::modifier::Modifier;
use super::types::{Anchor, Priority, Relation};

static NEXT_DESCRIPTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Synthetic identity of a descriptor
///
/// Assigned once at construction and kept by clones, so the same descriptor reached
/// through two restraints compares equal.
///
/// Ids come from one process-wide counter rather than from a restraint. Descriptors
/// are built outside any restraint (sizes, alignments, raw descriptors) and are
/// shared between restraints and diffed across them, so their ids must be unique
/// across every restraint and thread. Identifier registries stay per restraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        Self(NEXT_DESCRIPTOR_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// `first <relation> second * multiplier + constant`, or `first <relation> constant`
/// when there is no second anchor
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    id: DescriptorId,
    pub first: Anchor,
    pub relation: Relation,
    pub second: Option<Anchor>,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Priority,
    pub identifier: Option<String>,
}

impl ConstraintDescriptor {
    /// Relate two anchors, taking relation, multiple, constant, priority and
    /// identifier from `modifier`
    pub fn between(first: Anchor, second: Anchor, modifier: &Modifier) -> Self {
        Self::build(first, Some(second), modifier)
    }

    /// Relate an anchor to a constant, taking everything but the multiple from `modifier`
    pub fn constant(first: Anchor, modifier: &Modifier) -> Self {
        Self::build(first, None, modifier)
    }

    fn build(first: Anchor, second: Option<Anchor>, modifier: &Modifier) -> Self {
        let multiplier = if second.is_some() {
            modifier.multiple
        } else {
            1.0
        };
        Self {
            id: DescriptorId::next(),
            first,
            relation: modifier.relation,
            second,
            multiplier,
            constant: modifier.value,
            priority: modifier.priority,
            identifier: modifier.identifier.clone(),
        }
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }
}

impl PartialEq for ConstraintDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConstraintDescriptor {}

impl Hash for ConstraintDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ConstraintDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.second {
            Some(second) => {
                write!(f, "{} {} {}", self.first, self.relation, second)?;
                if self.multiplier != 1.0 {
                    write!(f, " * {}", self.multiplier)?;
                }
                if self.constant > 0.0 {
                    write!(f, " + {}", self.constant)?;
                } else if self.constant < 0.0 {
                    write!(f, " - {}", -self.constant)?;
                }
            }
            None => write!(f, "{} {} {}", self.first, self.relation, self.constant)?,
        }
        write!(f, " @ {}", self.priority)?;
        if let Some(identifier) = &self.identifier {
            write!(f, " [{}]", identifier)?;
        }
        Ok(())
    }
}
