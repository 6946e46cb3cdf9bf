//! Client error type

use thiserror::Error;

/// Status code FortiManager returns for a missing object
pub const OBJECT_NOT_FOUND: i64 = -3;

/// Errors from the FortiManager JSON-RPC client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// FortiManager answered with a non-zero status code.
    #[error("FortiManager returned code {code} for {url}: {message}")]
    Api {
        code: i64,
        message: String,
        url: String,
    },

    /// A URL placeholder had no value in the parameter map.
    #[error("URL parameter {0} has no value")]
    MissingUrlParameter(String),

    /// Login was rejected or no credentials were configured.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The response did not have the JSON-RPC shape we expect.
    #[error("Unexpected response: {0}")]
    Protocol(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { code, .. } if *code == OBJECT_NOT_FOUND)
    }

    /// Transport failures are worth another attempt; API answers are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Http(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
