use crate::Repositories;
use crate::error::RepositoryError;
use homelock_core::{Admin, SessionToken};
use homelock_network::{ApiResponse, BiometricToken, Content, Endpoint, LockApi};
use serde::Serialize;
use tracing::{info, warn};

/// Everything issued while onboarding a new administrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Onboarding {
    pub admin: Admin,
    pub session_id: SessionToken,
    pub biometric_token: BiometricToken,
}

impl<A: LockApi> Repositories<A> {
    /// Register a new administrator, log in with the issued credentials and
    /// start fingerprint enrollment for the new account.
    ///
    /// Every step publishes to its usual slot. The flow stops at the first
    /// step that fails and makes no retries.
    ///
    /// # Errors
    /// - `RepositoryError::Server` naming the endpoint the server rejected
    /// - `RepositoryError::Transport` or `RepositoryError::Decode` from the
    ///   step that failed
    pub async fn onboard_administrator(
        &self,
        username: &str,
        serial_number: &str,
    ) -> Result<Onboarding, RepositoryError> {
        let admin = accepted(
            Endpoint::Register,
            self.sessions.register(username, serial_number).await?,
        )?;

        let session_id = accepted(
            Endpoint::Login,
            self.sessions.get_session_id(username, &admin.password).await?,
        )?;

        let biometric_token = accepted(
            Endpoint::StartBiometric,
            self.members
                .add_biometric_data(admin.id, session_id.as_str())
                .await?,
        )?;

        info!(username, user_id = admin.id, "Administrator onboarded");
        Ok(Onboarding {
            admin,
            session_id,
            biometric_token,
        })
    }
}

fn accepted<T>(endpoint: Endpoint, response: ApiResponse<T>) -> Result<T, RepositoryError> {
    match response.content {
        Content::Value(value) if !response.error => Ok(value),
        _ => {
            warn!(endpoint = %endpoint, "Onboarding step rejected");
            Err(RepositoryError::Server {
                endpoint,
                code: response.error_code,
            })
        }
    }
}
