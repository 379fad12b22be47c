//! Error type shared by every backend call.
//!
//! ERROR HANDLING
//! ==============
//! `Display` output is the user-facing message: views render it directly into
//! hook `error` state or login banners.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

const FALLBACK_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The call only makes sense in the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Build a status error from a raw error body.
    pub fn from_status(status: u16, body: &str) -> Self {
        Self::Status { status, message: error_message_from_body(body) }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
}

/// Pick the human-readable message out of a backend error payload.
///
/// Looks at `detail`, then `error`, then `message`; anything else yields
/// "Request failed".
pub fn error_message_from_body(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    [parsed.detail, parsed.error, parsed.message]
        .into_iter()
        .flatten()
        .find_map(|value| value_to_message(&value))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_owned())
}

fn value_to_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // DRF validation errors arrive as lists of strings.
        serde_json::Value::Array(items) => items.iter().find_map(value_to_message),
        _ => None,
    }
}
