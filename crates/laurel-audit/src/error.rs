//! Error types for the audit crate.

use thiserror::Error;

/// Errors that can occur during audit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to write or read XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// The report document does not have the expected structure.
    #[error("malformed report: {0}")]
    MalformedReport(String),

    /// Failed to hand an item over to manual review.
    #[error("failed to flag item for manual review: {0}")]
    ReviewFailed(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AuditError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}
