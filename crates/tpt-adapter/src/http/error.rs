/*
[INPUT]:  Error sources (request building, HTTP, API status, JSON, auth state)
[OUTPUT]: Structured error types for every client operation
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the TPT adapter
#[derive(Error, Debug)]
pub enum TptError {
    /// Request body could not be encoded as JSON
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Header name or value rejected while building a request
    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-200 response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Token endpoint refused the client credentials
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Operation needs a token that is missing or revoked
    #[error("No token: {0}")]
    NoToken(String),

    /// Revoke endpoint answered but kept the token alive
    #[error("Token not revoked")]
    NotRevoked,

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TptError {
    /// Check if the error was recorded while building a request
    pub fn is_build_error(&self) -> bool {
        matches!(self, TptError::Encode(_) | TptError::InvalidHeader { .. })
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            TptError::Authentication { .. } | TptError::NoToken(_)
        ) || matches!(self, TptError::Api { code, .. } if *code == 401 || *code == 403)
    }

    /// Status code of an API error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TptError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TptError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Result type alias for TPT operations
pub type Result<T> = std::result::Result<T, TptError>;
