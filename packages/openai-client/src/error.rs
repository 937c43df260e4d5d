//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// Client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Missing or invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure (connection refused, timeout)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("unexpected response shape: {0}")]
    Parse(String),
}
