//! Error types for the Scribe application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Scribe application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ScribeError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "base64", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The generation service rejected or failed a request
    #[error("Generation service error{}: {message}", format_status(.status_code))]
    Service {
        status_code: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// The generation service answered without the expected payload
    #[error("Generation service returned no {stage}")]
    EmptyResponse { stage: String },

    /// Report synthesis was requested with no analysed images
    #[error("No analysed images are available; wait for analysis to finish before generating a report")]
    NothingToSynthesize,

    /// An image status change that does not follow pending -> analyzing -> done|error
    #[error("Invalid image status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// An operation that needs a report ran against a session without one
    #[error("Session '{0}' has no report")]
    MissingReport(String),

    /// Audio payload could not be decoded
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Prompt template rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn format_status(status_code: &Option<u16>) -> String {
    status_code.map(|code| format!(" ({code})")).unwrap_or_default()
}

impl ScribeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Service error
    pub fn service(status_code: Option<u16>, message: impl Into<String>, retryable: bool) -> Self {
        Self::Service {
            status_code,
            message: message.into(),
            retryable,
        }
    }

    /// Creates an EmptyResponse error for the named stage
    pub fn empty_response(stage: impl Into<String>) -> Self {
        Self::EmptyResponse {
            stage: stage.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error came from the generation service
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::EmptyResponse { .. })
    }

    /// Check if the service marked the failure as transient
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Service { retryable: true, .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ScribeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ScribeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<base64::DecodeError> for ScribeError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Serialization {
            format: "base64".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for ScribeError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

impl From<anyhow::Error> for ScribeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for ScribeError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, ScribeError>`.
pub type Result<T> = std::result::Result<T, ScribeError>;
