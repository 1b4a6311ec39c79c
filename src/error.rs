//! Error types and handling infrastructure for loglens.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary adds `anyhow` context on top of these.
//!
//! ## Design Principles
//!
//! - **Recoverable by default**: schema fallbacks, bad log lines and unreadable input
//!   files are collected as diagnostics rather than aborting the batch
//! - **Context preservation**: errors carry the path, source name or line number involved
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for loglens operations.
///
/// Schema resolution, per-line decoding and file access each have their own
/// variants so callers can tell a degraded result from an aborted one.
#[derive(Error, Debug)]
pub enum LoglensError {
    /// The custom schema file could not be read at all
    #[error("Cannot read schema file {path}: {source}")]
    SchemaSourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not a valid schema document
    #[error("Malformed schema in {path}: {message}")]
    SchemaMalformed { path: PathBuf, message: String },

    /// The schema was decoded but is missing required values
    #[error("Invalid schema in {path}: {reason}")]
    InvalidSchema { path: PathBuf, reason: String },

    /// Neither the custom nor the default schema could be used
    #[error("No usable schema: {reason}")]
    NoUsableSchema { reason: String },

    /// A single log line did not match the active schema
    #[error("Malformed log line {line_number} in {source_name}: {reason}")]
    MalformedLogLine {
        source_name: String,
        line_number: usize,
        reason: String,
    },

    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// A required record collection was absent
    #[error("Missing input: {what}")]
    NullInput { what: &'static str },

    /// Invalid user or command line input
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Application settings could not be loaded
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for loglens operations.
pub type Result<T> = std::result::Result<T, LoglensError>;

impl LoglensError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a MalformedLogLine for a line of a given source
    pub fn malformed_line(
        source_name: impl Into<String>,
        line_number: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedLogLine {
            source_name: source_name.into(),
            line_number,
            reason: reason.into(),
        }
    }

    /// Create a NoUsableSchema with a descriptive reason
    pub fn no_usable_schema(reason: impl Into<String>) -> Self {
        Self::NoUsableSchema {
            reason: reason.into(),
        }
    }

    /// Create an InvalidArgument with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether this error is one of the schema resolution failures
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaSourceUnreadable { .. }
                | Self::SchemaMalformed { .. }
                | Self::InvalidSchema { .. }
                | Self::NoUsableSchema { .. }
        )
    }
}

// Automatic conversion from io::Error to LoglensError
impl From<std::io::Error> for LoglensError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
