//! Error types for the Folium client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main client error type
///
/// Three failure surfaces, matching where a user-triggered action can go
/// wrong: local validation (never reaches the network), a non-success HTTP
/// reply, or a request that never completed.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{message}")]
    Request { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error body shape optionally returned by the API on non-2xx replies
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

impl ClientError {
    /// Build a `Request` error from a status code and an optional server
    /// error body, falling back to a generic status message.
    pub fn from_status(status: StatusCode, body: Option<ErrorBody>) -> Self {
        let message = body
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP error, status {}", status.as_u16()));
        ClientError::Request { status, message }
    }

    /// Message suitable for a user-facing notification
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
