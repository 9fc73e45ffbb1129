//! Error handling for the usage-logging tools
//!
//! One error enum covers all three providers. Nothing here is retried or
//! recovered; errors bubble up through `?` and terminate the binary with a
//! non-zero exit status.

use thiserror::Error;

/// Result type for usage query operations
pub type Result<T> = std::result::Result<T, UsageError>;

/// Main error type for the usage-logging tools
#[derive(Error, Debug)]
pub enum UsageError {
    /// Missing or invalid configuration (env vars, endpoints)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credential acquisition failures
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Transport-level failures (connect, TLS, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from a provider API
    #[error("Provider API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Service error reported through a provider SDK
    #[error("Provider error: {0}")]
    Provider(String),

    /// Malformed or incomplete response payloads
    #[error("Parsing error: {0}")]
    Parsing(String),
}

impl UsageError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        UsageError::Configuration(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        UsageError::Authentication(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        UsageError::Provider(msg.into())
    }

    /// Create a parsing error
    pub fn parsing(msg: impl Into<String>) -> Self {
        UsageError::Parsing(msg.into())
    }
}

impl From<reqwest::Error> for UsageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UsageError::Parsing(err.to_string())
        } else {
            UsageError::Network(err.to_string())
        }
    }
}
