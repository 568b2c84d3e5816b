//! Client error types

use std::collections::HashMap;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed before any renewal was attempted
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The session is terminally expired: the renewal protocol ran and
    /// could not produce a working credential
    #[error("Session expired")]
    SessionExpired,

    /// Validation failed with field-level errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        errors: HashMap<String, String>,
    },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from an envelope or HTTP status code
    pub fn from_status(code: u16, message: String) -> Self {
        match code {
            400 => Self::Validation {
                message,
                errors: HashMap::new(),
            },
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: code,
                message,
            },
        }
    }

    /// Whether this error means the presented credential was rejected
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed(_) | Self::SessionExpired
        )
    }

    /// Whether the renewal protocol has confirmed the session is gone.
    ///
    /// This is the only error kind that should collapse session state;
    /// everything else is local to the call site.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
