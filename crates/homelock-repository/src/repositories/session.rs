use super::settle;
use crate::error::RepositoryResult;
use crate::slot::ResponseSlot;
use chrono::{DateTime, Utc};
use homelock_core::{Admin, Session, SessionStore, SessionToken};
use homelock_network::{ApiResponse, Endpoint, LockApi, LoginRequest, Passthrough, RegisterRequest};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Registration, login and reset against the lock server, plus access to
/// the shared session record.
///
/// Each operation sends exactly one request and publishes the decoded
/// response to its own slot: registration, login or reset. Successful
/// registration and login also update the session record, before the
/// response is published, so observers woken by the slot already see the
/// new credentials.
pub struct SessionRepository<A> {
    api: Arc<A>,
    session: Arc<SessionStore>,
    registration: ResponseSlot<Admin>,
    login: ResponseSlot<SessionToken>,
    reset: ResponseSlot<Passthrough>,
}

impl<A: LockApi> SessionRepository<A> {
    pub fn new(api: Arc<A>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            registration: ResponseSlot::new(),
            login: ResponseSlot::new(),
            reset: ResponseSlot::new(),
        }
    }

    /// Pair this client with the lock identified by `serial_number` and
    /// create the administrator account.
    ///
    /// On success the issued credentials are recorded in the session: the
    /// username, the server-generated password, the admin id, and the
    /// registered flag.
    ///
    /// # Errors
    /// - `RepositoryError::Transport` if no envelope was received
    /// - `RepositoryError::Decode` if the content is not an admin record
    pub async fn register(
        &self,
        username: &str,
        serial_number: &str,
    ) -> RepositoryResult<Admin> {
        debug!(username, "Registering administrator");
        let request = RegisterRequest::new(username, serial_number);
        let response = settle::<Admin>(Endpoint::Register, self.api.register(&request).await)?;

        if let Some(admin) = response.value() {
            self.session.record_registration(username, admin);
            info!(username, user_id = admin.id, "Administrator registered");
        }

        self.registration.publish(response.clone());
        Ok(response)
    }

    /// Log in and obtain a session token.
    ///
    /// On success the token and the login time are recorded in the session.
    pub async fn get_session_id(
        &self,
        username: &str,
        password: &str,
    ) -> RepositoryResult<SessionToken> {
        debug!(username, "Logging in");
        let request = LoginRequest::new(username, password);
        let response = settle::<SessionToken>(Endpoint::Login, self.api.login(&request).await)?;

        if let Some(token) = response.value() {
            self.session.record_login(token.clone());
            info!(username, "Logged in");
        }

        self.login.publish(response.clone());
        Ok(response)
    }

    /// Log in with the username and password held in the session.
    pub async fn login_with_stored_credentials(&self) -> RepositoryResult<SessionToken> {
        let username = self.session.username();
        let password = self.session.password();
        self.get_session_id(&username, &password).await
    }

    /// Ask the server to reset the lock, using the current session token.
    ///
    /// This is destructive on the server side. Local session state is left
    /// as it is; call [`reset_local_session`](Self::reset_local_session)
    /// afterwards to forget it.
    pub async fn reset_all(&self) -> RepositoryResult<Passthrough> {
        let token = self.session.session_id();
        info!("Requesting remote reset");
        let outcome = self.api.reset(token.as_str()).await;
        let response = settle::<Passthrough>(Endpoint::Reset, outcome)?;

        self.reset.publish(response.clone());
        Ok(response)
    }

    /// Forget every session field. Does not contact the server.
    pub fn reset_local_session(&self) {
        self.session.wipe();
        info!("Local session wiped");
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn snapshot(&self) -> Session {
        self.session.snapshot()
    }

    pub fn username(&self) -> String {
        self.session.username()
    }

    pub fn password(&self) -> String {
        self.session.password()
    }

    pub fn session_id(&self) -> SessionToken {
        self.session.session_id()
    }

    pub fn server_address(&self) -> String {
        self.session.server_address()
    }

    pub fn user_id(&self) -> i64 {
        self.session.user_id()
    }

    pub fn is_registered(&self) -> bool {
        self.session.is_registered()
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.session.last_login()
    }

    pub fn set_username(&self, username: impl Into<String>) {
        self.session.set_username(username);
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.session.set_password(password);
    }

    pub fn set_session_id(&self, token: SessionToken) {
        self.session.set_session_id(token);
    }

    pub fn set_server_address(&self, address: impl Into<String>) {
        self.session.set_server_address(address);
    }

    pub fn set_user_id(&self, user_id: i64) {
        self.session.set_user_id(user_id);
    }

    pub fn set_registered(&self) {
        self.session.set_registered();
    }

    pub fn subscribe_registration(&self) -> watch::Receiver<ApiResponse<Admin>> {
        self.registration.subscribe()
    }

    pub fn subscribe_login(&self) -> watch::Receiver<ApiResponse<SessionToken>> {
        self.login.subscribe()
    }

    pub fn subscribe_reset(&self) -> watch::Receiver<ApiResponse<Passthrough>> {
        self.reset.subscribe()
    }
}
