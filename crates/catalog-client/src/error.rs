//! HTTP client error types.

use catalog_auth::AuthError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request or read the response.
    #[error("Request failed: {0}")]
    Request(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Mutation blocked before sending.
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),
}

impl FetchError {
    /// Transport failure (no HTTP response was received).
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Request(_))
    }

    /// Blocked client-side for lack of a token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, FetchError::Unauthorized(_))
    }

    /// Text suitable for a notice description.
    ///
    /// For HTTP errors this is the server's message alone.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Json(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}
