//! Declarative alignments and their resolution into constraint descriptors
//!
//! An [`Alignment`] is a base edge/center kind wrapped in any number of decorations
//! (identifier, priority, offset, inset). Resolution walks the decorations down to
//! the base kind, which picks the anchors and relation, and each decoration then
//! stamps its own field on the way back out, so the outermost decoration of each
//! field decides the final value.

use super::descriptor::ConstraintDescriptor;
use super::modifier::Modifier;
use super::types::{Attribute, Axis, Edges, Priority, Relation, Target};

/// What to align, plus optional decorations
#[derive(Debug, Clone, PartialEq)]
pub enum Alignment {
    Top,
    Bottom,
    Left,
    Leading,
    Right,
    Trailing,
    CenterX,
    CenterY,

    SoftTop,
    SoftBottom,
    SoftLeft,
    SoftLeading,
    SoftRight,
    SoftTrailing,

    WithIdentifier(Box<Alignment>, String),
    WithPriority(Box<Alignment>, Priority),
    WithOffset(Box<Alignment>, f64),
    WithInset(Box<Alignment>, f64),
}

impl Alignment {
    pub fn with_id(self, identifier: impl Into<String>) -> Self {
        Self::WithIdentifier(Box::new(self), identifier.into())
    }

    pub fn priority(self, priority: Priority) -> Self {
        Self::WithPriority(Box::new(self), priority)
    }

    /// Replace the constant with `offset`
    pub fn offset(self, offset: f64) -> Self {
        Self::WithOffset(Box::new(self), offset)
    }

    /// Shrink the bounded region by `inset` on this alignment's edge
    pub fn inset(self, inset: f64) -> Self {
        Self::WithInset(Box::new(self), inset)
    }

    /// The undecorated kind at the bottom of the decoration chain
    pub fn base(&self) -> &Alignment {
        match self {
            Self::WithIdentifier(inner, _)
            | Self::WithPriority(inner, _)
            | Self::WithOffset(inner, _)
            | Self::WithInset(inner, _) => inner.base(),
            base => base,
        }
    }

    /// Anchor attribute and relation of the base kind
    pub fn attribute_and_relation(&self) -> (Attribute, Relation) {
        match self {
            Self::WithIdentifier(inner, _)
            | Self::WithPriority(inner, _)
            | Self::WithOffset(inner, _)
            | Self::WithInset(inner, _) => inner.attribute_and_relation(),
            Self::Top => (Attribute::Top, Relation::Equal),
            Self::Bottom => (Attribute::Bottom, Relation::Equal),
            Self::Left => (Attribute::Left, Relation::Equal),
            Self::Leading => (Attribute::Leading, Relation::Equal),
            Self::Right => (Attribute::Right, Relation::Equal),
            Self::Trailing => (Attribute::Trailing, Relation::Equal),
            Self::CenterX => (Attribute::CenterX, Relation::Equal),
            Self::CenterY => (Attribute::CenterY, Relation::Equal),
            Self::SoftTop => (Attribute::Top, Relation::AtLeast),
            Self::SoftBottom => (Attribute::Bottom, Relation::AtMost),
            Self::SoftLeft => (Attribute::Left, Relation::AtLeast),
            Self::SoftLeading => (Attribute::Leading, Relation::AtLeast),
            Self::SoftRight => (Attribute::Right, Relation::AtMost),
            Self::SoftTrailing => (Attribute::Trailing, Relation::AtMost),
        }
    }

    pub fn is_soft(&self) -> bool {
        self.attribute_and_relation().1 != Relation::Equal
    }

    /// The axis the base kind positions along
    pub fn axis(&self) -> Axis {
        match self.attribute_and_relation().0 {
            Attribute::Top | Attribute::Bottom | Attribute::CenterY => Axis::Vertical,
            _ => Axis::Horizontal,
        }
    }

    /// True for top, left and leading kinds, hard or soft
    pub fn is_start_edge(&self) -> bool {
        matches!(
            self.attribute_and_relation().0,
            Attribute::Top | Attribute::Left | Attribute::Leading
        )
    }

    /// True for bottom, right and trailing kinds, hard or soft
    pub fn is_end_edge(&self) -> bool {
        matches!(
            self.attribute_and_relation().0,
            Attribute::Bottom | Attribute::Right | Attribute::Trailing
        )
    }

    pub fn is_center(&self) -> bool {
        !self.is_start_edge() && !self.is_end_edge()
    }

    /// Signed constant for an inset on the base edge; centers have no inset
    fn inset_constant(&self, inset: f64) -> f64 {
        if self.is_start_edge() {
            inset
        } else if self.is_end_edge() {
            -inset
        } else {
            0.0
        }
    }

    /// Resolve into a descriptor constraining `source` against `target`
    ///
    /// Only `value`, `priority` and `identifier` of `modifier` are used; the relation
    /// always comes from the base kind.
    pub fn resolve(
        &self,
        source: &Target,
        target: &Target,
        modifier: &Modifier,
    ) -> ConstraintDescriptor {
        match self {
            Self::WithIdentifier(inner, identifier) => {
                let working = modifier.with_identifier(identifier.clone());
                let mut descriptor = inner.resolve(source, target, &working);
                descriptor.identifier = Some(identifier.clone());
                descriptor
            }
            Self::WithPriority(inner, priority) => {
                let working = modifier.with_priority(*priority);
                let mut descriptor = inner.resolve(source, target, &working);
                descriptor.priority = *priority;
                descriptor
            }
            Self::WithOffset(inner, offset) => {
                let working = modifier.with_value(*offset);
                let mut descriptor = inner.resolve(source, target, &working);
                descriptor.constant = *offset;
                descriptor
            }
            Self::WithInset(inner, inset) => {
                let constant = inner.inset_constant(*inset);
                let working = modifier.with_value(constant);
                let mut descriptor = inner.resolve(source, target, &working);
                descriptor.constant = constant;
                descriptor
            }
            base => {
                let (attribute, relation) = base.attribute_and_relation();
                let working = modifier.with_relation(relation).with_multiple(1.0);
                ConstraintDescriptor::between(
                    source.anchor(attribute),
                    target.anchor(attribute),
                    &working,
                )
            }
        }
    }
}

/// Push `alignment` unless an equal one is already present
pub(crate) fn insert_unique(set: &mut Vec<Alignment>, alignment: Alignment) {
    if !set.contains(&alignment) {
        set.push(alignment);
    }
}

impl From<Edges> for Vec<Alignment> {
    fn from(edges: Edges) -> Self {
        let mut alignments = Vec::new();
        if edges.contains(Edges::TOP) {
            alignments.push(Alignment::Top);
        }
        if edges.contains(Edges::BOTTOM) {
            alignments.push(Alignment::Bottom);
        }
        if edges.contains(Edges::LEFT) {
            alignments.push(Alignment::Left);
        }
        if edges.contains(Edges::RIGHT) {
            alignments.push(Alignment::Right);
        }
        alignments
    }
}

/// Common alignment groups
pub struct AlignmentSet;

impl AlignmentSet {
    pub const ALL_SIDES: [Alignment; 4] = [
        Alignment::Top,
        Alignment::Bottom,
        Alignment::Leading,
        Alignment::Trailing,
    ];
    pub const VERTICAL: [Alignment; 2] = [Alignment::Top, Alignment::Bottom];
    pub const HORIZONTAL: [Alignment; 2] = [Alignment::Leading, Alignment::Trailing];

    pub const ALL_SOFT_SIDES: [Alignment; 4] = [
        Alignment::SoftTop,
        Alignment::SoftBottom,
        Alignment::SoftLeading,
        Alignment::SoftTrailing,
    ];
    pub const SOFT_VERTICAL: [Alignment; 2] = [Alignment::SoftTop, Alignment::SoftBottom];
    pub const SOFT_HORIZONTAL: [Alignment; 2] = [Alignment::SoftLeading, Alignment::SoftTrailing];

    pub const CENTER_XY: [Alignment; 2] = [Alignment::CenterX, Alignment::CenterY];
}

/// One target with the alignments it should receive, for batch alignment
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAlignment {
    pub target: Target,
    pub alignments: Vec<Alignment>,
}

impl TargetAlignment {
    pub fn new(target: &Target, alignments: impl Into<Vec<Alignment>>) -> Self {
        Self {
            target: target.clone(),
            alignments: alignments.into(),
        }
    }
}
