//! Error handling module for the equiptrain client.
//!
//! Provides a single error type shared by the remote client, the list stores
//! and configuration loading. Reconciliation code matches on these variants
//! instead of catching panics.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const HTTP_STATUS: &str = "HTTP_STATUS";
    pub const REJECTED: &str = "REJECTED";
    pub const MALFORMED_RESPONSE: &str = "MALFORMED_RESPONSE";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The request never produced a response (connect, timeout, body read)
    Transport(String),
    /// Non-success HTTP status without a parseable envelope
    Status { status: u16, message: String },
    /// The backend answered with `success: false`
    Rejected(String),
    /// The response body did not match the envelope schema
    Malformed(String),
    /// Entity not present in local state
    NotFound(String),
    /// Invalid input supplied by the caller
    Validation(String),
    /// Index outside the current list bounds
    OutOfRange { index: usize, len: usize },
    /// Configuration could not be loaded
    Config(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => codes::TRANSPORT_ERROR,
            AppError::Status { .. } => codes::HTTP_STATUS,
            AppError::Rejected(_) => codes::REJECTED,
            AppError::Malformed(_) => codes::MALFORMED_RESPONSE,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::OutOfRange { .. } => codes::OUT_OF_RANGE,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Transport(msg) => msg.clone(),
            AppError::Status { status, message } => format!("HTTP {}: {}", status, message),
            AppError::Rejected(msg) => msg.clone(),
            AppError::Malformed(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::OutOfRange { index, len } => {
                format!("Index {} is out of range for a list of {} items", index, len)
            }
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// Whether the error came from talking to the backend.
    ///
    /// Transport failures, bad statuses, `success: false` payloads and
    /// malformed bodies all reconcile the same way.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_)
                | AppError::Status { .. }
                | AppError::Rejected(_)
                | AppError::Malformed(_)
        )
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!("HTTP transport error: {:?}", err);
        if err.is_decode() {
            AppError::Malformed(format!("Response decode error: {}", err))
        } else {
            AppError::Transport(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!("JSON error: {:?}", err);
        AppError::Malformed(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Config(format!("IO error: {}", err))
    }
}

/// User-facing notice produced when a mutation is reverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub code: String,
    pub message: String,
}

impl Notice {
    pub fn from_error(error: &AppError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.message(),
        }
    }
}
