use homelock_core::ErrorCode;
use homelock_network::{ApiResponse, DecodeError, Endpoint, TransportError};
use thiserror::Error;

/// Errors returned by repository operations.
///
/// A server-reported error is not one of these: it is a regular
/// [`ApiResponse`] with the error flag set, published like any other
/// response. Only multi-step flows, which cannot continue past a rejected
/// step, turn it into [`RepositoryError::Server`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No usable envelope arrived; the response slot was left unchanged
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Success envelope with content of the wrong shape; the response slot
    /// was left unchanged
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Server rejected one step of a multi-step flow
    #[error(
        "Server rejected {endpoint}: {}",
        .code.as_ref().map_or("no error code", |code| code.as_str())
    )]
    Server {
        endpoint: Endpoint,
        code: Option<ErrorCode>,
    },
}

impl RepositoryError {
    /// Whether the failure happened before any envelope was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Error code reported by the server, if this is a server rejection.
    pub fn error_code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Server { code, .. } => code.as_ref(),
            _ => None,
        }
    }
}

/// Result of a single repository operation: the published response, or the
/// reason nothing was published.
pub type RepositoryResult<T> = Result<ApiResponse<T>, RepositoryError>;
