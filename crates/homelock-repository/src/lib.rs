//! Repository layer for homelock
//!
//! This crate sits between callers (a UI, the CLI) and the lock server. Each
//! repository operation sends one request through a [`LockApi`]
//! implementation, decodes the reply into the shape that operation expects,
//! and publishes the result to an observable [`ResponseSlot`].
//!
//! # Architecture
//!
//! - [`SessionRepository`] - registration, login, remote reset and the
//!   shared session record
//! - [`HouseholdMemberRepository`] - member listing, creation, biometric
//!   enrollment and image paths
//! - [`ResponseSlot`] - latest response of one operation kind, backed by a
//!   `tokio::sync::watch` channel
//! - [`Repositories`] - both repositories over one client and one session,
//!   built once at startup
//!
//! # Outcomes
//!
//! Every operation ends in one of three ways:
//!
//! - `Ok` with a success response: content decoded, slot updated
//! - `Ok` with a server error: content is the zero sentinel, slot updated
//! - `Err`: transport or decode failure, slot left as it was
//!
//! # Examples
//!
//! ```no_run
//! use homelock_core::SessionStore;
//! use homelock_network::{ClientConfig, HttpLockClient};
//! use homelock_repository::Repositories;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::with_server_address("192.168.1.20"));
//! let client = HttpLockClient::new(ClientConfig::default(), session.clone())?;
//! let repos = Repositories::new(client, session);
//!
//! let mut members = repos.members.subscribe_member_list();
//!
//! let login = repos.sessions.get_session_id("alice", "secret").await?;
//! if let Err(code) = login.into_result() {
//!     eprintln!("login rejected: {code:?}");
//!     return Ok(());
//! }
//!
//! let token = repos.sessions.session_id();
//! repos.members.get_all_household_members(token.as_str()).await?;
//!
//! members.changed().await?;
//! if let Some(list) = members.borrow().value() {
//!     println!("{} household members", list.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
mod onboarding;
pub mod repositories;
mod slot;

pub use error::{RepositoryError, RepositoryResult};
pub use onboarding::Onboarding;
pub use repositories::{HouseholdMemberRepository, SessionRepository};
pub use slot::ResponseSlot;

use homelock_core::SessionStore;
use homelock_network::LockApi;
use std::sync::Arc;

/// Both repositories, sharing one client and one session record.
pub struct Repositories<A> {
    pub sessions: SessionRepository<A>,
    pub members: HouseholdMemberRepository<A>,
}

impl<A: LockApi> Repositories<A> {
    pub fn new(api: A, session: Arc<SessionStore>) -> Self {
        Self::from_shared(Arc::new(api), session)
    }

    /// Build from a client that is also used elsewhere.
    pub fn from_shared(api: Arc<A>, session: Arc<SessionStore>) -> Self {
        Self {
            sessions: SessionRepository::new(api.clone(), session),
            members: HouseholdMemberRepository::new(api),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.sessions.session()
    }
}
