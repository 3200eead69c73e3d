//! Domain error types

use std::time::SystemTime;

use thiserror::Error;

/// Category of a recording failure.
///
/// Every category maps onto a fixed status code; `Internal` failures may
/// carry the exit code of the capture process instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid configuration or unsupported platform
    InvalidInput,
    /// Stop requested with no active recording
    NotFound,
    /// Start requested while already recording
    Conflict,
    /// Spawn/build failure, abnormal exit or failure diagnostics
    Internal,
}

impl ErrorKind {
    /// Default status code for this category
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidInput => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

/// Uniform failure descriptor used across the recorder.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct RecordingError {
    pub kind: ErrorKind,
    pub code: i32,
    pub message: String,
    pub timestamp: SystemTime,
}

impl RecordingError {
    /// Create an error with the default code of `kind`
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::with_code(kind, kind.code(), message)
    }

    /// Create an error with an explicit code
    pub fn with_code(kind: ErrorKind, code: i32, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            timestamp: SystemTime::now(),
        }
    }

    /// 400: a config field failed validation
    pub fn invalid_field(field: &str, value: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorKind::InvalidInput,
            format!("Invalid {}: {}", field, value),
        )
    }

    /// 400: the host platform has no capture backend
    pub fn unsupported_platform(platform: &str) -> Self {
        Self::new(
            ErrorKind::InvalidInput,
            format!("Unsupported platform: {}", platform),
        )
    }

    /// 404: nothing to stop
    pub fn no_active_recording() -> Self {
        Self::new(ErrorKind::NotFound, "No active recording to stop.")
    }

    /// 409: a session is already running
    pub fn already_recording() -> Self {
        Self::new(ErrorKind::Conflict, "Recording is already in progress.")
    }

    /// 500 with a free-form message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl PartialEq for RecordingError {
    /// Timestamps are ignored so errors can be compared by meaning
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.code == other.code && self.message == other.message
    }
}

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected <number> followed by h, m or s, combined as needed (e.g., 30s, 2m30s, 1h15m)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
