//! Core types shared by the constraint builders

use std::fmt;

use bitflags::bitflags;

use super::modifier::{Modifier, RelativeSize, SizeValue};

/// Identity of a layout target
///
/// Targets are owned by the host's visual tree; this crate only refers to them by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a target is a rendered view or an invisible layout guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    View,
    Guide,
}

/// Anchors on a target that can take part in a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Top,
    Bottom,
    Left,
    Right,
    Leading,
    Trailing,
    CenterX,
    CenterY,
    Width,
    Height,
}

impl Attribute {
    /// The axis this attribute positions, or `None` for dimensions
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::Top | Self::Bottom | Self::CenterY => Some(Axis::Vertical),
            Self::Left | Self::Right | Self::Leading | Self::Trailing | Self::CenterX => {
                Some(Axis::Horizontal)
            }
            Self::Width | Self::Height => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::CenterX => "center_x",
            Self::CenterY => "center_y",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Layout direction of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Comparison between the two sides of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    #[default]
    Equal,
    AtLeast,
    AtMost,
}

impl Relation {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Constraint strength on the 0..=1000 scale; 1000 is required
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(pub f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const HIGH: Priority = Priority(750.0);
    pub const LOW: Priority = Priority(250.0);
    pub const FITTING_SIZE: Priority = Priority(50.0);

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named reference point or dimension on a specific target
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub target: TargetId,
    pub attribute: Attribute,
}

impl Anchor {
    pub fn new(target: TargetId, attribute: Attribute) -> Self {
        Self { target, attribute }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.target, self.attribute)
    }
}

/// Vertical anchors a proxy may substitute for its top or bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YAnchor {
    Top,
    CenterY,
    Bottom,
}

impl YAnchor {
    fn attribute(self) -> Attribute {
        match self {
            Self::Top => Attribute::Top,
            Self::CenterY => Attribute::CenterY,
            Self::Bottom => Attribute::Bottom,
        }
    }
}

/// Horizontal anchors a proxy may substitute for its leading or trailing edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XAnchor {
    Leading,
    CenterX,
    Trailing,
}

impl XAnchor {
    fn attribute(self) -> Attribute {
        match self {
            Self::Leading => Attribute::Leading,
            Self::CenterX => Attribute::CenterX,
            Self::Trailing => Attribute::Trailing,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AnchorOverrides {
    top: Attribute,
    bottom: Attribute,
    leading: Attribute,
    trailing: Attribute,
}

impl Default for AnchorOverrides {
    fn default() -> Self {
        Self {
            top: Attribute::Top,
            bottom: Attribute::Bottom,
            leading: Attribute::Leading,
            trailing: Attribute::Trailing,
        }
    }
}

/// A rectangular layout participant
///
/// Cloning a target clones the handle, not the underlying element.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    id: TargetId,
    kind: TargetKind,
    overrides: AnchorOverrides,
}

impl Target {
    /// A view target
    pub fn view(id: impl Into<String>) -> Self {
        Self::new(TargetId::new(id), TargetKind::View)
    }

    /// A layout guide target
    pub fn guide(id: impl Into<String>) -> Self {
        Self::new(TargetId::new(id), TargetKind::Guide)
    }

    pub fn new(id: TargetId, kind: TargetKind) -> Self {
        Self {
            id,
            kind,
            overrides: AnchorOverrides::default(),
        }
    }

    pub fn id(&self) -> &TargetId {
        &self.id
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// The anchor for `attribute`, after any proxy redirection
    pub fn anchor(&self, attribute: Attribute) -> Anchor {
        let attribute = match attribute {
            Attribute::Top => self.overrides.top,
            Attribute::Bottom => self.overrides.bottom,
            Attribute::Leading => self.overrides.leading,
            Attribute::Trailing => self.overrides.trailing,
            other => other,
        };
        Anchor::new(self.id.clone(), attribute)
    }

    /// A handle to the same element whose edge anchors can be redirected
    pub fn proxy(&self) -> Self {
        self.clone()
    }

    /// Redirect this target's top anchor
    pub fn top_is(mut self, anchor: YAnchor) -> Self {
        self.overrides.top = anchor.attribute();
        self
    }

    /// Redirect this target's bottom anchor
    pub fn bottom_is(mut self, anchor: YAnchor) -> Self {
        self.overrides.bottom = anchor.attribute();
        self
    }

    /// Redirect this target's leading anchor
    pub fn leading_is(mut self, anchor: XAnchor) -> Self {
        self.overrides.leading = anchor.attribute();
        self
    }

    /// Redirect this target's trailing anchor
    pub fn trailing_is(mut self, anchor: XAnchor) -> Self {
        self.overrides.trailing = anchor.attribute();
        self
    }

    /// A size value equal to `value`
    pub fn equal_size(&self, value: f64) -> SizeValue {
        SizeValue::new(self.clone(), Modifier::new(value))
    }

    /// A size value of at least `value`
    pub fn min_size(&self, value: f64) -> SizeValue {
        SizeValue::new(self.clone(), Modifier::new(value).with_relation(Relation::AtLeast))
    }

    /// A size value of at most `value`
    pub fn max_size(&self, value: f64) -> SizeValue {
        SizeValue::new(self.clone(), Modifier::new(value).with_relation(Relation::AtMost))
    }

    /// A size of `multiple` times `other`'s matching dimension
    pub fn multiple(&self, multiple: f64, other: &Target) -> RelativeSize {
        RelativeSize::new(self.clone(), multiple, other.clone())
    }
}

bitflags! {
    /// A set of target edges
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const TOP = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;

        const VERTICAL = Self::TOP.bits() | Self::BOTTOM.bits();
        const HORIZONTAL = Self::LEFT.bits() | Self::RIGHT.bits();
        const ALL = Self::VERTICAL.bits() | Self::HORIZONTAL.bits();
    }
}

/// A solved rectangle in the container's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}
