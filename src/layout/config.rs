//! Configuration for restraint builders

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read restraint config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse restraint config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Whether container alignments are hard equalities or soft inequalities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pinning {
    #[default]
    Normal,
    Soft,
}

/// Which cross-axis anchor chained targets share with their container
///
/// `Start` is top for a horizontal chain and left for a vertical one; `End` is
/// bottom or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Centering {
    #[default]
    Start,
    Center,
    End,
}

/// Pinning and centering for chains laid out inside a container
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Pinning of the cross-axis edges of every chained target
    pub axis_pinning: Pinning,

    /// Pinning of the first target's start edge and the last target's end edge
    pub ends_pinning: Pinning,

    /// Cross-axis anchor shared with the container
    pub centering: Centering,
}

impl ChainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis_pinning(mut self, pinning: Pinning) -> Self {
        self.axis_pinning = pinning;
        self
    }

    pub fn with_ends_pinning(mut self, pinning: Pinning) -> Self {
        self.ends_pinning = pinning;
        self
    }

    pub fn with_centering(mut self, centering: Centering) -> Self {
        self.centering = centering;
        self
    }
}

/// Options shared by every builder call on a restraint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RestraintConfig {
    /// Spacing between chained targets when no spacing modifier separates them
    pub default_spacing: f64,

    /// Defaults for chains laid out inside a container
    pub chain: ChainConfig,
}

impl Default for RestraintConfig {
    fn default() -> Self {
        Self {
            default_spacing: 8.0,
            chain: ChainConfig::default(),
        }
    }
}

impl RestraintConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default chain spacing
    pub fn with_default_spacing(mut self, spacing: f64) -> Self {
        self.default_spacing = spacing;
        self
    }

    /// Set the chain-in-container defaults
    pub fn with_chain(mut self, chain: ChainConfig) -> Self {
        self.chain = chain;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
