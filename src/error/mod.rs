//! Error handling for hammock.
//!
//! This module provides:
//! - [`HammockError`]: The main error enum for the I/O shell around the engine
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//!
//! The roll-up engine in [`crate::core`] never fails; every error here comes
//! from loading configuration or reading a work-item source.

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for hammock operations.
#[derive(Error, Debug)]
pub enum HammockError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    #[error("Malformed source {path}: {reason}")]
    MalformedSource { path: String, reason: String },

    #[error("Invalid column identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HammockError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) | Self::Serialization(_) => ErrorCode::SerializationError,
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::UnsupportedSource(_) => ErrorCode::SourceUnsupported,
            Self::MalformedSource { .. } => ErrorCode::SourceMalformed,
            Self::InvalidIdentifier(_) => ErrorCode::InvalidIdentifier,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::SourceNotFound(path) => Some(serde_json::json!({ "path": path })),
            Self::UnsupportedSource(path) => Some(serde_json::json!({ "path": path })),
            Self::MalformedSource { path, reason } => {
                Some(serde_json::json!({ "path": path, "reason": reason }))
            }
            Self::InvalidIdentifier(ident) => Some(serde_json::json!({ "identifier": ident })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// Emitted in machine output mode so scripts can branch on the code instead
/// of parsing the message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "SOURCE_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "input", "config", "storage")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a [`HammockError`].
    #[must_use]
    pub fn from_error(err: &HammockError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<HammockError> for StructuredError {
    fn from(err: HammockError) -> Self {
        Self::from_error(&err)
    }
}

impl From<&HammockError> for StructuredError {
    fn from(err: &HammockError) -> Self {
        Self::from_error(err)
    }
}

/// Result type alias using [`HammockError`].
pub type Result<T> = std::result::Result<T, HammockError>;
