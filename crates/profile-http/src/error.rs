//! Error types for profile REST operations.

use std::io;
use thiserror::Error;

/// Result type for profile REST operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the profile API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Server responded {status}: {body}")]
    Status { status: u16, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Operation timed out")]
    Timeout,

    #[error("Request aborted")]
    Aborted,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Check if this error is retryable.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => {
                crate::client::utils::is_retryable_status(*status)
            }
            ApiError::Timeout | ApiError::Io(_) | ApiError::Http(_) => true,
            _ => false,
        }
    }

    /// Check if this is an access denied error.
    #[inline]
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => {
                crate::client::utils::is_access_denied_status(*status)
            }
            _ => false,
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
