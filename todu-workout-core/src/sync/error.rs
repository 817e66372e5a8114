//! Sync error types and the mapping from failures to display messages.

use serde::Deserialize;
use thiserror::Error;

/// Shown when a failure carries no usable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Errors that can occur while talking to the workout API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// Request never produced a response (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),
    /// Server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field from the response body, if any
        message: Option<String>,
    },
    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Message shown to the user for this failure.
    ///
    /// A server-supplied message wins over the transport description.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error body shape returned by the workout API.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extracts `message` from a raw body, ignoring anything that isn't JSON.
    pub(crate) fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
    }
}

/// Maps any failure to a displayable string. Never fails.
pub fn normalize_error(error: &(dyn std::error::Error + 'static)) -> String {
    if let Some(transport) = error.downcast_ref::<TransportError>() {
        return transport.user_message();
    }

    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
