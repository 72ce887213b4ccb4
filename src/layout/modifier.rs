//! Constraint modifiers and the size records built from them

use std::fmt;

use super::types::{Priority, Relation, Target};

/// Numeric offset, scale, relation, priority and optional identifier of a constraint
///
/// Modifiers are immutable values: every `with_*` method returns a modified copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub value: f64,
    pub multiple: f64,
    pub relation: Relation,
    pub priority: Priority,
    pub identifier: Option<String>,
}

impl Modifier {
    /// An equality modifier with constant `value`, multiple 1 and required priority
    pub fn new(value: f64) -> Self {
        Self {
            value,
            multiple: 1.0,
            relation: Relation::Equal,
            priority: Priority::REQUIRED,
            identifier: None,
        }
    }

    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    pub fn with_multiple(&self, multiple: f64) -> Self {
        Self {
            multiple,
            ..self.clone()
        }
    }

    pub fn with_relation(&self, relation: Relation) -> Self {
        Self {
            relation,
            ..self.clone()
        }
    }

    pub fn with_priority(&self, priority: Priority) -> Self {
        Self {
            priority,
            ..self.clone()
        }
    }

    pub fn with_identifier(&self, identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..self.clone()
        }
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modifier({} {} @ {})", self.relation, self.value, self.priority)
    }
}

/// Spacing modifiers for chains
pub struct Space;

impl Space {
    /// Exactly `value` points between two chained targets
    pub fn equal(value: f64) -> Modifier {
        Modifier::new(value)
    }

    /// At most `value` points between two chained targets
    pub fn most(value: f64) -> Modifier {
        Modifier::new(value).with_relation(Relation::AtMost)
    }

    /// At least `value` points between two chained targets
    pub fn least(value: f64) -> Modifier {
        Modifier::new(value).with_relation(Relation::AtLeast)
    }
}

/// An absolute width or height for a single target
#[derive(Debug, Clone, PartialEq)]
pub struct SizeValue {
    pub target: Target,
    pub modifier: Modifier,
}

impl SizeValue {
    pub fn new(target: Target, modifier: Modifier) -> Self {
        Self { target, modifier }
    }

    pub fn with_priority(&self, priority: Priority) -> Self {
        Self::new(self.target.clone(), self.modifier.with_priority(priority))
    }

    pub fn with_identifier(&self, identifier: impl Into<String>) -> Self {
        Self::new(self.target.clone(), self.modifier.with_identifier(identifier))
    }
}

/// A width or height expressed as a multiple of another target's
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeSize {
    pub source: Target,
    pub of: Target,
    pub modifier: Modifier,
}

impl RelativeSize {
    /// `source` sized at `multiple` times `of`, plus no constant
    pub fn new(source: Target, multiple: f64, of: Target) -> Self {
        Self {
            source,
            of,
            modifier: Modifier::new(0.0).with_multiple(multiple),
        }
    }

    /// Add a constant on top of the scaled size
    pub fn plus(&self, constant: f64) -> Self {
        Self {
            modifier: self.modifier.with_value(constant),
            ..self.clone()
        }
    }

    pub fn with_relation(&self, relation: Relation) -> Self {
        Self {
            modifier: self.modifier.with_relation(relation),
            ..self.clone()
        }
    }

    pub fn with_priority(&self, priority: Priority) -> Self {
        Self {
            modifier: self.modifier.with_priority(priority),
            ..self.clone()
        }
    }

    pub fn with_identifier(&self, identifier: impl Into<String>) -> Self {
        Self {
            modifier: self.modifier.with_identifier(identifier),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_defaults() {
        let m = Modifier::new(12.0);
        assert_eq!(m.value, 12.0);
        assert_eq!(m.multiple, 1.0);
        assert_eq!(m.relation, Relation::Equal);
        assert_eq!(m.priority, Priority::REQUIRED);
        assert_eq!(m.identifier, None);
    }

    #[test]
    fn test_with_identifier_returns_copy() {
        let m = Modifier::new(4.0);
        let tagged = m.with_identifier("gap");
        assert_eq!(m.identifier, None);
        assert_eq!(tagged.identifier.as_deref(), Some("gap"));
        assert_eq!(tagged.value, 4.0);
    }

    #[test]
    fn test_space_relations() {
        assert_eq!(Space::equal(3.0).relation, Relation::Equal);
        assert_eq!(Space::most(3.0).relation, Relation::AtMost);
        assert_eq!(Space::least(3.0).relation, Relation::AtLeast);
    }

    #[test]
    fn test_modifier_display() {
        let m = Space::least(8.0).with_priority(Priority::HIGH);
        assert_eq!(m.to_string(), "Modifier(>= 8 @ 750)");
    }

    #[test]
    fn test_relative_size_leaves_targets_untouched() {
        let a = Target::view("a");
        let b = Target::view("b");
        let rel = a.multiple(0.5, &b).plus(10.0).with_identifier("half");

        assert_eq!(rel.source, a);
        assert_eq!(rel.of, b);
        assert_eq!(rel.modifier.multiple, 0.5);
        assert_eq!(rel.modifier.value, 10.0);
        assert_eq!(rel.modifier.identifier.as_deref(), Some("half"));
    }
}
