//! Error types for cooper-pair.
//!
//! The client performs no local recovery: HTTP status failures, GraphQL
//! error lists, and upload rejections are surfaced to the caller as-is.

use thiserror::Error;

/// Top-level error type for cooper-pair.
#[derive(Debug, Error)]
pub enum PairError {
    // Expected caller failures
    #[error("Configuration error: {0}")]
    Config(#[from] super::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Remote and infrastructure failures
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Upload failed (status {status}): {message}")]
    Upload { status: u16, message: String },

    #[error("GraphQL request failed: {0}")]
    Graphql(super::GraphqlErrorList),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl PairError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check if this error came from the transport rather than the service.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

/// Result type alias for cooper-pair.
pub type Result<T> = std::result::Result<T, PairError>;
