//! Error types for the HTTP client wrapper.
//!
//! Cancellation is a distinct variant so callers (and the auth policy) can
//! tell a superseded request apart from a real failure.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request was superseded by a duplicate or cancelled explicitly.
    #[error("Request cancelled: {reason}")]
    Cancelled { reason: String },

    /// Server answered with a non-success status.
    #[error("Request failed with status {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
        body: String,
    },

    /// Request never produced a response (connect, TLS, body read).
    #[error("Transport error for '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A pipeline stage rejected the request before it was sent.
    #[error("Middleware '{stage}' rejected request: {message}")]
    Middleware { stage: &'static str, message: String },
}

impl ApiError {
    /// Build a status error from a raw response body, extracting `detail`.
    pub fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        let detail = extract_detail(&body);
        ApiError::Status {
            status,
            detail,
            body,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Pull the `detail` field out of a JSON error payload.
///
/// Non-string details (validation error lists) are kept as compact JSON so
/// substring checks still see their content.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}
