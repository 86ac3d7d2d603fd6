//! Error types for TeamMate
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for TeamMate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Validation errors (1xx)
    ValidationFailed = 100,

    // Formation errors (2xx)
    TeamIncomplete = 200,

    // Participant data errors (3xx)
    DataOutOfRange = 300,

    // Configuration errors (4xx)
    ConfigNotFound = 400,
    ConfigParseError = 401,
    ConfigValidation = 402,

    // IO errors (5xx)
    IoRead = 500,
    IoWrite = 501,
    IoPermission = 502,
    IoNotFound = 503,
    Serialization = 510,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Validation errors
            200..=299 => 20, // Formation errors
            300..=399 => 30, // Data errors
            400..=499 => 40, // Config errors
            500..=599 => 50, // IO errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Allocation Errors
    // ─────────────────────────────────────────────────────────────

    /// Allocation inputs rejected before any work started
    #[error("Invalid allocation request: {}", violations.join("; "))]
    Validation { violations: Vec<String> },

    /// A team failed the completion check
    #[error("{team_id} incomplete with only {size} members (expected {expected})")]
    Formation {
        team_id: String,
        size: usize,
        expected: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // Participant Data Errors
    // ─────────────────────────────────────────────────────────────

    /// A numeric participant field is outside its valid band
    #[error("Invalid {field} {value}: {message}")]
    Data {
        field: &'static str,
        value: i64,
        message: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Validation { .. } => ErrorCode::ValidationFailed,
            Error::Formation { .. } => ErrorCode::TeamIncomplete,
            Error::Data { .. } => ErrorCode::DataOutOfRange,

            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Json(_) | Error::Toml(_) => ErrorCode::Serialization,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the caller can retry with corrected inputs
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. }
                | Error::Formation { .. }
                | Error::Io(_)
                | Error::IoRead { .. }
                | Error::IoWrite { .. }
        )
    }

    /// Check if the error is fatal (process should exit)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. }
                | Error::ConfigParse { .. }
                | Error::ConfigValidation { .. }
                | Error::Config(_)
                | Error::Internal(_)
        )
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::Validation { .. } => Some(
                "Use a positive team size no larger than the number of participants."
            ),
            Error::Formation { .. } => Some(
                "Retry with a different team size or participant pool."
            ),
            Error::Data { .. } => Some(
                "Skill level must be 1-10 and personality score must be 50-100."
            ),
            Error::ConfigNotFound { .. } => Some(
                "Run 'teammate config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'teammate config validate' to see details."
            ),
            Error::ConfigValidation { .. } | Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values."
            ),
            Error::IoRead { .. } => Some(
                "Check that the roster file exists and is readable."
            ),
            Error::Json(_) => Some(
                "The roster must be a JSON array of participant records."
            ),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a validation error from a list of violation messages
    pub fn validation(violations: Vec<String>) -> Self {
        Error::Validation { violations }
    }

    /// Create a formation error for a deficient team
    pub fn formation(team_id: impl Into<String>, size: usize, expected: usize) -> Self {
        Error::Formation {
            team_id: team_id.into(),
            size,
            expected,
        }
    }

    /// Create a data error for an out-of-band numeric field
    pub fn data(field: &'static str, value: impl Into<i64>, message: impl Into<String>) -> Self {
        Error::Data {
            field,
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
