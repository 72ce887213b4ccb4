//! Restraint - declarative layout constraints for rectangular targets
//!
//! This library describes edge/center alignment, spacing chains and sizing between
//! targets, resolves those descriptions into constraint descriptors, and activates
//! them through a host [`LayoutEngine`]. [`KasuariEngine`] is a ready-made engine
//! backed by the kasuari Cassowary solver.
//!
//! # Example
//!
//! ```rust
//! use restraint::{chain, Alignment, Frame, KasuariEngine, Restraint, Space, Target};
//!
//! let root = Target::view("root");
//! let a = Target::view("a");
//! let b = Target::view("b");
//!
//! let restraint = Restraint::new(&root)
//!     .add_items(&[a.clone(), b.clone()])
//!     .align_items(&[a.clone()], &[Alignment::Leading.inset(10.0)])
//!     .align_items(&[a.clone(), b.clone()], &[Alignment::Top])
//!     .set_widths(&[a.equal_size(50.0), b.equal_size(50.0)])
//!     .chain_horizontally(&chain![&a, Space::equal(8.0), &b]);
//!
//! let mut engine = KasuariEngine::new();
//! engine.add_root(&root, Frame::new(0.0, 0.0, 320.0, 200.0)).unwrap();
//! restraint.activate(&mut engine).unwrap();
//! engine.layout();
//!
//! let frame = engine.frame(&b).unwrap();
//! assert!((frame.x - 68.0).abs() < 0.001);
//! ```

pub mod error;
pub mod layout;
pub mod restraint;

pub use error::RestraintError;
pub use layout::{
    Alignment, AlignmentSet, Anchor, Attribute, Axis, Centering, ChainConfig, ChainEntry,
    ConfigError, ConstraintDescriptor, DescriptorId, Edges, EngineError, Frame, KasuariEngine,
    LayoutEngine, Modifier, Pinning, Priority, Relation, RelativeSize, RestraintConfig, SizeValue,
    SolverError, Space, Target, TargetAlignment, TargetId, TargetKind, XAnchor, YAnchor,
};
pub use restraint::Restraint;

/// Build a chain from targets and spacing modifiers
///
/// Each element is converted with [`ChainEntry::from`], so targets (owned or
/// borrowed) and [`Modifier`]s can be mixed freely.
///
/// ```rust
/// use restraint::{chain, ChainEntry, Space, Target};
///
/// let a = Target::view("a");
/// let b = Target::view("b");
/// let entries: Vec<ChainEntry> = chain![&a, Space::least(4.0), &b];
/// assert_eq!(entries.len(), 3);
/// ```
#[macro_export]
macro_rules! chain {
    ($($entry:expr),* $(,)?) => {
        vec![$($crate::ChainEntry::from($entry)),*]
    };
}
