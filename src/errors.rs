//! Error types for the AURA assistant
//!
//! The engine itself (projection, resolver, classifier) never errors;
//! it degrades to `None`/sentinel values. These variants cover the
//! outer layers: configuration, record loading, and the two backends.

use thiserror::Error;

/// Main error type for the AURA assistant
#[derive(Error, Debug)]
pub enum AuraError {
    /// Extraction service errors (login / attendance fetch)
    #[error("Extraction API error: {0}")]
    ExtractionApi(String),

    /// Generative backend errors
    #[error("Generative API error: {0}")]
    GenerativeApi(String),

    /// Attendance record parsing errors
    #[error("Invalid attendance record: {0}")]
    InvalidRecord(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AuraError>;

/// Convert anyhow errors to AuraError
impl From<anyhow::Error> for AuraError {
    fn from(err: anyhow::Error) -> Self {
        AuraError::Generic(err.to_string())
    }
}
