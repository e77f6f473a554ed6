//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Input/source errors
//! - 3xx: Config errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for machine output.
///
/// Each variant maps to a numeric code (e.g., `SourceNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Input errors (1xx)
    // ========================================
    /// E101: Work-item source file does not exist
    SourceNotFound,
    /// E102: Source kind could not be determined or is not supported
    SourceUnsupported,
    /// E103: Source exists but could not be parsed
    SourceMalformed,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E604: Database operation failed
    DatabaseError,
    /// E605: Serialization/deserialization failed
    SerializationError,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: Configured table or column name is not a safe identifier
    InvalidIdentifier,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `SourceNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::SourceNotFound => 101,
            Self::SourceUnsupported => 102,
            Self::SourceMalformed => 103,

            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            Self::DatabaseError => 604,
            Self::SerializationError => 605,

            Self::InvalidIdentifier => 801,

            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::SourceNotFound => "Check the input path. Pass a .json snapshot or a .db/.sqlite file",
            Self::SourceUnsupported => "Use --source json or --source sqlite to pick the reader explicitly",
            Self::SourceMalformed => "Validate the snapshot: it must be an object with an `items` array",
            Self::ConfigInvalid => "Run `hammock config` to see current values. Check TOML syntax in config file",
            Self::ConfigMissingRequired => "Set the required value in .hammock/config.toml or via HAMMOCK_* env vars",
            Self::DatabaseError => "Check that the SQLite file holds the configured table and columns ([source] section)",
            Self::SerializationError => "The data format may be corrupted. Check input data for validity",
            Self::InvalidIdentifier => "Table and column names in [source] must not contain quotes or NUL bytes",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::SourceNotFound
            | Self::SourceUnsupported
            | Self::SourceMalformed
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::InvalidIdentifier
            | Self::DatabaseError
            | Self::IoError => true,

            Self::SerializationError => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "input",
            3 => "config",
            6 => "storage",
            8 => "validation",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::SourceNotFound,
            Self::SourceUnsupported,
            Self::SourceMalformed,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::DatabaseError,
            Self::SerializationError,
            Self::InvalidIdentifier,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
