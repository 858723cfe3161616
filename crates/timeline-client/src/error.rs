//! Error types for the timeline client
//!
//! Two failure families reach callers:
//! - [`FetchError`]: record retrieval failed (network, status, malformed body)
//! - [`DeleteError`]: a delete request was not accepted
//!
//! Configuration problems are reported separately as [`ConfigError`].

use serde::Deserialize;
use std::path::PathBuf;

/// Record retrieval failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Request never produced a response
    #[error("transport error fetching {url}: {message}")]
    Transport { url: String, message: String },

    /// Non-success response
    #[error("server returned {status} for {url}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        url: String,
        status: u16,
        message: Option<String>,
    },

    /// Response body does not match the record shape
    #[error("malformed record from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// Target could not be turned into a URL
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Check if a later attempt may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode { .. } | Self::InvalidUrl(_) => false,
        }
    }

    /// HTTP status, if the server answered
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Delete request failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    /// Request never produced a response
    #[error("transport error deleting {url}: {message}")]
    Transport { url: String, message: String },

    /// Non-success response
    #[error("delete of {url} rejected with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        url: String,
        status: u16,
        message: Option<String>,
    },

    /// Target could not be turned into a URL
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl DeleteError {
    /// Message suitable for showing to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Status { status: 403, .. } => "You are not allowed to delete this.".to_string(),
            Self::Status { status: 404, .. } => "It has already been deleted.".to_string(),
            Self::Status { .. } | Self::Transport { .. } | Self::InvalidUrl(_) => {
                "Delete failed. Please try again.".to_string()
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file malformed
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Base URL does not parse
    #[error("invalid base url '{0}'")]
    InvalidBaseUrl(String),

    /// HTTP client could not be built
    #[error("http client setup failed: {0}")]
    HttpClient(String),
}

/// Error payload returned by the API on failure
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorPayload {
    /// Most specific human-readable text in a failure body
    pub(crate) fn message_from(body: &[u8]) -> Option<String> {
        let payload: ErrorPayload = serde_json::from_slice(body).ok()?;
        payload.message.or(payload.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_is_retryable() {
        let transport = FetchError::Transport {
            url: "/api/edit/1".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(transport.is_retryable());

        let server = FetchError::Status {
            url: "/api/edit/1".to_string(),
            status: 503,
            message: None,
        };
        assert!(server.is_retryable());

        let missing = FetchError::Status {
            url: "/api/edit/1".to_string(),
            status: 404,
            message: None,
        };
        assert!(!missing.is_retryable());
        assert_eq!(missing.status(), Some(404));
    }

    #[test]
    fn status_display_includes_message() {
        let err = DeleteError::Status {
            url: "/api/edit/1".to_string(),
            status: 409,
            message: Some("Cannot delete creation edit".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "delete of /api/edit/1 rejected with 409: Cannot delete creation edit"
        );
        assert_eq!(err.user_message(), "Cannot delete creation edit");
    }

    #[test]
    fn payload_prefers_message_over_error() {
        let body = br#"{"error": "Conflict", "message": "Cannot delete creation edit"}"#;
        assert_eq!(
            ErrorPayload::message_from(body).as_deref(),
            Some("Cannot delete creation edit")
        );

        let body = br#"{"error": "Forbidden"}"#;
        assert_eq!(ErrorPayload::message_from(body).as_deref(), Some("Forbidden"));

        assert_eq!(ErrorPayload::message_from(b"<html>"), None);
    }
}
