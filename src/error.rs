//! Error types for contract violations in restraint builders

use thiserror::Error;

/// A builder call that breaks the restraint contract
///
/// The fluent builder methods on [`crate::Restraint`] panic with this error's message;
/// the `try_*` entry points return it instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RestraintError {
    /// A spacing modifier with no target on one side of it
    #[error("Malformed restrainable chain: {chain}")]
    MalformedChain { chain: String },

    /// A second descriptor registered under an identifier already in use
    #[error("Identifier must be unique: {identifier}")]
    DuplicateIdentifier { identifier: String },
}

impl RestraintError {
    /// Create a malformed chain error describing the offending sequence
    pub fn malformed_chain(chain: impl Into<String>) -> Self {
        Self::MalformedChain {
            chain: chain.into(),
        }
    }

    /// Create a duplicate identifier error
    pub fn duplicate_identifier(identifier: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.into(),
        }
    }
}
