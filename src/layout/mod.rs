//! Constraint descriptions and the engines that enact them
//!
//! This module turns declarative alignment, chain and size requests into
//! [`ConstraintDescriptor`]s, and defines the [`LayoutEngine`] boundary those
//! descriptors are handed to.

pub mod alignment;
pub mod chain;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod modifier;
pub mod solver;
pub mod types;

pub use alignment::{Alignment, AlignmentSet, TargetAlignment};
pub use chain::{chain_targets, resolve_chain, ChainAlignment, ChainEntry};
pub use config::{Centering, ChainConfig, ConfigError, Pinning, RestraintConfig};
pub use descriptor::{ConstraintDescriptor, DescriptorId};
pub use engine::{EngineError, LayoutEngine};
pub use modifier::{Modifier, RelativeSize, SizeValue, Space};
pub use solver::{KasuariEngine, SolverError};
pub use types::*;
