//! Structured error types for store and collaborator operations.

use serde::Serialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Caller errors
    InvalidPath,
    Conversion,

    // Not found errors
    FileNotFound,
    DirectoryNotFound,

    // Document errors
    InvalidDocument,

    // Internal errors
    Io,
}

/// Structured error returned by the store and its file collaborators.
#[derive(Debug, Serialize)]
pub struct ConfigError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            details: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_path(path: &str) -> Self {
        Self::new(
            ErrorCode::InvalidPath,
            format!("Invalid key path: '{}'", path),
        )
        .with_path(path)
    }

    pub fn conversion(path: &str, from: impl fmt::Display, to: &str) -> Self {
        Self::new(
            ErrorCode::Conversion,
            format!("Cannot convert {} at '{}' to {}", from, path, to),
        )
        .with_path(path)
    }

    pub fn file_not_found(file: &Path) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File does not exist: {}", file.display()),
        )
        .with_path(file.display().to_string())
    }

    pub fn directory_not_found(dir: &Path) -> Self {
        Self::new(
            ErrorCode::DirectoryNotFound,
            format!("Directory does not exist: {}", dir.display()),
        )
        .with_path(dir.display().to_string())
    }

    pub fn invalid_document(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidDocument, err.to_string())
    }

    pub fn io(file: &Path, err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::Io, format!("I/O error on {}", file.display()))
            .with_path(file.display().to_string())
            .with_details(err.to_string())
    }

    /// True if this error came from a value conversion.
    pub fn is_conversion(&self) -> bool {
        self.code == ErrorCode::Conversion
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{}: {}", self.message, details),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failures while encoding or decoding a document.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("top-level document must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

impl From<CodecError> for ConfigError {
    fn from(err: CodecError) -> Self {
        ConfigError::invalid_document(err)
    }
}

/// Result type for store operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
