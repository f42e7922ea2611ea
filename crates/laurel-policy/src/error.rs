//! Error types for rule set loading.

use thiserror::Error;

/// Errors that can occur while loading or validating a rule set.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Failed to read the rules file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The rules file is not valid YAML or does not match the schema.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A keyword or label is empty.
    #[error("invalid rule set: {0}")]
    InvalidRule(String),
}
