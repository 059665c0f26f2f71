pub mod household;
pub mod session;

pub use household::HouseholdMemberRepository;
pub use session::SessionRepository;

use crate::error::RepositoryResult;
use homelock_network::{Endpoint, RawEnvelope, TransportResult};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

/// Turn the outcome of one request into the response to publish.
///
/// Transport and decode failures are logged here and returned as errors;
/// the caller publishes only on `Ok`.
fn settle<T: DeserializeOwned>(
    endpoint: Endpoint,
    outcome: TransportResult<RawEnvelope>,
) -> RepositoryResult<T> {
    let envelope = outcome.inspect_err(|e| {
        warn!(endpoint = %endpoint, error = %e, "Request failed, keeping previous response");
    })?;

    let response = envelope.decode::<T>(endpoint).inspect_err(|e| {
        error!(endpoint = %endpoint, error = %e, "Response content has unexpected shape");
    })?;

    if let Some(code) = &response.error_code {
        debug!(endpoint = %endpoint, code = %code, "Server reported error");
    } else if response.is_error() {
        debug!(endpoint = %endpoint, "Server reported error without code");
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use homelock_core::ErrorCode;
    use homelock_network::{MemberId, TransportError};
    use serde_json::json;

    #[test]
    fn test_settle_success() {
        let response =
            settle::<MemberId>(Endpoint::CreateUser, Ok(RawEnvelope::success(json!(3)))).unwrap();
        assert_eq!(response.value(), Some(&3));
    }

    #[test]
    fn test_settle_server_error_is_ok() {
        let response = settle::<MemberId>(
            Endpoint::CreateUser,
            Ok(RawEnvelope::failure(ErrorCode::NameAlreadyInUse)),
        )
        .unwrap();
        assert!(response.is_error());
        assert!(response.content.is_zero());
    }

    #[test]
    fn test_settle_transport_error() {
        let result = settle::<MemberId>(
            Endpoint::CreateUser,
            Err(TransportError::Connection("refused".to_string())),
        );
        assert!(matches!(result, Err(RepositoryError::Transport(_))));
    }

    #[test]
    fn test_settle_decode_error() {
        let result = settle::<MemberId>(
            Endpoint::CreateUser,
            Ok(RawEnvelope::success(json!({"id": 3}))),
        );
        assert!(matches!(result, Err(RepositoryError::Decode(_))));
    }
}
