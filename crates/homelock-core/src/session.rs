//! Client-side session state.
//!
//! [`Session`] is the plain record; [`SessionStore`] is the shared,
//! lock-guarded instance that repositories and the HTTP client read from.
//! One store exists per running application and is handed out as
//! `Arc<SessionStore>` by the startup code.

use crate::error::{Error, Result};
use crate::types::{Admin, SessionToken};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Identity, credentials and server address of the current administrator.
///
/// Every field starts empty (`""`, `0`, `false`, `None`) and returns to that
/// state on [`SessionStore::wipe`].
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    /// Administrator username chosen at registration
    pub username: String,

    /// Server-issued password, plaintext as received
    pub password: String,

    /// Token from the last successful login, empty before that
    pub session_token: SessionToken,

    /// Host, `host:port` or full URL of the lock server
    pub server_address: String,

    /// Administrator user id
    pub user_id: i64,

    /// Whether registration with the lock completed
    pub registered: bool,

    /// Time of the last successful login
    pub last_login: Option<DateTime<Utc>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("session_token", &self.session_token)
            .field("server_address", &self.server_address)
            .field("user_id", &self.user_id)
            .field("registered", &self.registered)
            .field("last_login", &self.last_login)
            .finish()
    }
}

/// Shared session state guarded by a read/write lock.
///
/// Accessors are synchronous and perform no validation. A poisoned lock is
/// recovered rather than propagated: every write replaces whole fields, so
/// the record stays consistent even if a writer panicked.
///
/// # Examples
///
/// ```
/// use homelock_core::{SessionStore, SessionToken};
///
/// let store = SessionStore::new();
/// store.set_server_address("192.168.1.20");
/// store.set_session_id(SessionToken::new("tok-123"));
/// assert_eq!(store.session_id().as_str(), "tok-123");
///
/// store.wipe();
/// assert!(store.session_id().is_empty());
/// assert_eq!(store.server_address(), "");
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session bound to an already discovered server address.
    pub fn with_server_address(address: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_server_address(address);
        store
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the whole record.
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    pub fn username(&self) -> String {
        self.read().username.clone()
    }

    pub fn password(&self) -> String {
        self.read().password.clone()
    }

    pub fn session_id(&self) -> SessionToken {
        self.read().session_token.clone()
    }

    pub fn server_address(&self) -> String {
        self.read().server_address.clone()
    }

    pub fn user_id(&self) -> i64 {
        self.read().user_id
    }

    pub fn is_registered(&self) -> bool {
        self.read().registered
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.read().last_login
    }

    pub fn set_username(&self, username: impl Into<String>) {
        self.write().username = username.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        self.write().password = password.into();
    }

    pub fn set_session_id(&self, token: SessionToken) {
        self.write().session_token = token;
    }

    pub fn set_server_address(&self, address: impl Into<String>) {
        self.write().server_address = address.into();
    }

    pub fn set_user_id(&self, user_id: i64) {
        self.write().user_id = user_id;
    }

    /// Mark registration as complete. There is no way to unset the flag
    /// other than [`wipe`](Self::wipe).
    pub fn set_registered(&self) {
        self.write().registered = true;
    }

    /// Store the credentials issued by a successful registration.
    pub fn record_registration(&self, username: &str, admin: &Admin) {
        let mut session = self.write();
        session.username = username.to_string();
        session.password = admin.password.clone();
        session.user_id = admin.id;
        session.registered = true;
    }

    /// Store the token issued by a successful login.
    pub fn record_login(&self, token: SessionToken) {
        let mut session = self.write();
        session.session_token = token;
        session.last_login = Some(Utc::now());
    }

    /// Reset every field to its empty default. Does not contact the server.
    pub fn wipe(&self) {
        *self.write() = Session::default();
    }

    /// Server address to send requests to.
    ///
    /// # Errors
    /// - `Error::MissingAddress` if no address has been discovered yet
    /// - `Error::InvalidAddress` if the stored address contains whitespace
    pub fn require_server_address(&self) -> Result<String> {
        let address = self.read().server_address.trim().to_string();
        if address.is_empty() {
            return Err(Error::MissingAddress);
        }
        if address.chars().any(char::is_whitespace) {
            return Err(Error::InvalidAddress(address));
        }
        Ok(address)
    }
}
