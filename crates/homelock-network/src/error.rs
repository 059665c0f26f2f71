use crate::api::Endpoint;
use thiserror::Error;

/// Errors where no usable envelope reached the client.
///
/// A transport error never updates a response slot; it is handed back to
/// the caller of the repository operation instead.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server address missing or malformed, or invalid client configuration
    #[error(transparent)]
    Core(#[from] homelock_core::Error),

    /// Endpoint URL could not be built from the server address
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// Request timed out
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// Server could not be reached
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Server answered with a non-success HTTP status
    #[error("Unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Response body is not an envelope
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Any other HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A success envelope whose content does not match the operation's shape.
#[derive(Debug, Error)]
#[error("Cannot decode {endpoint} content: {source}")]
pub struct DecodeError {
    pub endpoint: Endpoint,
    #[source]
    pub source: serde_json::Error,
}

/// Specialized result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
