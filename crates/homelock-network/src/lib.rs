//! Network layer for homelock
//!
//! This crate provides the transport seam between the repositories and the
//! lock server, the HTTP implementation of it, and the envelope decoder that
//! turns raw replies into typed responses.
//!
//! # Components
//!
//! - **LockApi**: one async method per server endpoint, returning raw envelopes
//! - **HttpLockClient**: `reqwest`-backed implementation against a real server
//! - **MockLockApi**: scripted implementation for tests and offline development
//! - **RawEnvelope / ApiResponse**: wire envelope and its typed, decoded form
//!
//! # Example
//!
//! ```no_run
//! use homelock_core::SessionStore;
//! use homelock_network::{ClientConfig, Endpoint, HttpLockClient, LockApi, MemberList};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::with_server_address("192.168.1.20"));
//! let client = HttpLockClient::new(ClientConfig::default(), session)?;
//!
//! let response = client
//!     .get_user_list("tok-123")
//!     .await?
//!     .decode::<MemberList>(Endpoint::UserList)?;
//!
//! if let Some(members) = response.value() {
//!     println!("{} household members", members.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
pub mod envelope;
mod error;
pub mod mock;
pub mod request;

pub use api::{Endpoint, LockApi, Method};
pub use client::{ClientConfig, HttpLockClient};
pub use envelope::{
    ApiResponse, BiometricToken, Content, ImagePaths, MemberId, MemberList, Passthrough,
    RawEnvelope,
};
pub use error::{DecodeError, TransportError, TransportResult};
pub use request::{
    BiometricRequest, CreateMemberRequest, LoginRequest, RegisterRequest, ResetRequest,
};
