//! Error types for the todo protocol

use thiserror::Error;

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while building or sending todo operations
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Input rejected before any request was built
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP request error (connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the endpoint
    #[error("API error: {message} (status: {status})")]
    Api {
        /// Response body as text
        message: String,
        /// HTTP status code
        status: u16,
    },

    /// Body is not JSON or lacks the `{data: {...}}` envelope
    #[error("Decode error: {0}")]
    Decode(String),

    /// The endpoint answered with GraphQL errors and no data
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ProtocolError {
    /// Whether the failure happened on the wire (anything but validation).
    ///
    /// Decode failures are reported the same way as transport failures.
    pub fn is_transport(&self) -> bool {
        !matches!(
            self,
            ProtocolError::Validation(_) | ProtocolError::Configuration(_)
        )
    }

    /// Whether the input was rejected before a request was issued
    pub fn is_validation(&self) -> bool {
        matches!(self, ProtocolError::Validation(_))
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::Decode(err.to_string())
    }
}
