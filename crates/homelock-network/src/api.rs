#![allow(async_fn_in_trait)]

//! Transport seam between the repositories and the lock server.
//!
//! [`LockApi`] has one method per server endpoint. Each returns the raw
//! envelope exactly as received; interpreting it is the job of
//! [`RawEnvelope::decode`](crate::RawEnvelope::decode). Implementations:
//!
//! - [`HttpLockClient`](crate::HttpLockClient) talks to a real server over HTTP
//! - [`MockLockApi`](crate::mock::MockLockApi) replays scripted envelopes in tests
//!
//! **NOTE**: This trait is NOT object-safe because `async fn` methods return
//! `impl Future`. Consumers are generic over `A: LockApi` instead.

use crate::envelope::RawEnvelope;
use crate::error::TransportResult;
use crate::request::{BiometricRequest, CreateMemberRequest, LoginRequest, RegisterRequest};
use homelock_core::constants::{
    PATH_BIOMETRIC, PATH_IMAGES, PATH_LOGIN, PATH_REGISTER, PATH_RESET, PATH_USERS,
};
use serde::Serialize;
use std::fmt;

/// One server operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Login,
    Register,
    Reset,
    UserList,
    CreateUser,
    StartBiometric,
    ImagePaths,
}

/// HTTP method an endpoint is served on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Endpoint {
    /// Every endpoint, in declaration order.
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::Reset,
        Endpoint::UserList,
        Endpoint::CreateUser,
        Endpoint::StartBiometric,
        Endpoint::ImagePaths,
    ];

    /// Path relative to the server root.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => PATH_LOGIN,
            Endpoint::Register => PATH_REGISTER,
            Endpoint::Reset => PATH_RESET,
            Endpoint::UserList | Endpoint::CreateUser => PATH_USERS,
            Endpoint::StartBiometric => PATH_BIOMETRIC,
            Endpoint::ImagePaths => PATH_IMAGES,
        }
    }

    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Endpoint::UserList | Endpoint::ImagePaths => Method::Get,
            _ => Method::Post,
        }
    }

    /// Short name used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Register => "register",
            Endpoint::Reset => "reset",
            Endpoint::UserList => "user_list",
            Endpoint::CreateUser => "create_user",
            Endpoint::StartBiometric => "start_biometric",
            Endpoint::ImagePaths => "image_paths",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lock server operations.
///
/// Every method issues exactly one request. There is no retry and no
/// cancellation; the only timeout is the one the implementation's transport
/// is configured with.
///
/// # Errors
///
/// All methods return [`TransportError`](crate::TransportError) when no
/// envelope could be obtained. A server-side rejection is NOT an error at
/// this level: it arrives as an envelope with `error == true`.
pub trait LockApi: Send + Sync {
    /// Log in and obtain a session token.
    async fn login(&self, request: &LoginRequest) -> TransportResult<RawEnvelope>;

    /// Register the administrator with the lock's serial number.
    async fn register(&self, request: &RegisterRequest) -> TransportResult<RawEnvelope>;

    /// Wipe all household state on the server.
    async fn reset(&self, session_id: &str) -> TransportResult<RawEnvelope>;

    /// List household members.
    async fn get_user_list(&self, session_id: &str) -> TransportResult<RawEnvelope>;

    /// Create a household member.
    async fn create_user(&self, request: &CreateMemberRequest) -> TransportResult<RawEnvelope>;

    /// Start biometric enrollment for a member.
    async fn start_biometric_data(
        &self,
        request: &BiometricRequest,
    ) -> TransportResult<RawEnvelope>;

    /// List image paths captured for a member.
    async fn get_image_paths(
        &self,
        username: &str,
        session_id: &str,
    ) -> TransportResult<RawEnvelope>;
}
