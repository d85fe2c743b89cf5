//! Errors produced by the shared HTTP client.

use super::ErrorDetail;
use std::sync::Arc;
use thiserror::Error;

/// Result type for HTTP client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures raised while talking to the backend.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Setup(String),

    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid endpoint '{path}': {reason}")]
    InvalidEndpoint {
        /// Relative path requested.
        path: String,
        /// Join failure description.
        reason: String,
    },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        source: Arc<reqwest::Error>,
    },

    /// The backend answered with a non-success status.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        /// Request method.
        method: &'static str,
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Decoded `detail` payload, when present.
        detail: Option<ErrorDetail>,
    },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response from {url}: {reason}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder failure description.
        reason: String,
    },
}

impl ApiError {
    /// Wraps a transport-level failure.
    pub fn transport(url: impl Into<String>, err: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source: Arc::new(err),
        }
    }

    /// Returns the HTTP status when the backend responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for a 404 response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }

    /// Returns `true` for a 401 response.
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Returns `true` for a 4xx response other than 401 and 404.
    #[must_use]
    pub const fn is_client_rejection(&self) -> bool {
        matches!(
            self.status(),
            Some(status) if status >= 400 && status < 500 && status != 401 && status != 404
        )
    }

    /// Returns the backend's `detail` payload, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            Self::Status { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// Produces the message shown to the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.user_message(),
            Self::Status { status, .. } => format!("request failed with HTTP {status}"),
            Self::Transport { .. } => "could not reach the server".to_owned(),
            other => other.to_string(),
        }
    }
}
