//! Scripted lock server for testing and development.
//!
//! [`MockLockApi`] implements [`LockApi`] without any network. Replies are
//! queued per [`Endpoint`] and consumed in order; every call is recorded so
//! tests can assert on what was sent. An endpoint with nothing queued
//! behaves like an unreachable server.

use crate::api::{Endpoint, LockApi};
use crate::envelope::RawEnvelope;
use crate::error::{TransportError, TransportResult};
use crate::request::{BiometricRequest, CreateMemberRequest, LoginRequest, RegisterRequest};
use homelock_core::ErrorCode;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Deliver this envelope
    Envelope(RawEnvelope),

    /// Fail as if the server could not be reached
    Unreachable,

    /// Fail as if the request timed out
    Timeout,

    /// Deliver this envelope after the given delay
    Delayed(Duration, RawEnvelope),
}

/// A call received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,

    /// Parameters the call was made with, as JSON
    pub params: Value,
}

#[derive(Debug, Default)]
struct MockState {
    replies: HashMap<Endpoint, VecDeque<MockReply>>,
    calls: Vec<RecordedCall>,
}

/// Scripted [`LockApi`] implementation.
///
/// Clones share the same script and call log.
///
/// # Examples
///
/// ```
/// use homelock_network::mock::MockLockApi;
/// use homelock_network::{Endpoint, LockApi, LoginRequest};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let api = MockLockApi::new();
///     api.queue_success(Endpoint::Login, json!("tok-123"));
///
///     let envelope = api.login(&LoginRequest::new("alice", "secret")).await.unwrap();
///     assert!(!envelope.error);
///     assert_eq!(envelope.content, json!("tok-123"));
///     assert_eq!(api.calls_to(Endpoint::Login).len(), 1);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockLockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockLockApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue an arbitrary reply for `endpoint`.
    pub fn queue(&self, endpoint: Endpoint, reply: MockReply) {
        self.state()
            .replies
            .entry(endpoint)
            .or_default()
            .push_back(reply);
    }

    /// Queue a success envelope carrying `content`.
    pub fn queue_success(&self, endpoint: Endpoint, content: Value) {
        self.queue(endpoint, MockReply::Envelope(RawEnvelope::success(content)));
    }

    /// Queue an error envelope carrying `code`.
    pub fn queue_error(&self, endpoint: Endpoint, code: ErrorCode) {
        self.queue(endpoint, MockReply::Envelope(RawEnvelope::failure(code)));
    }

    /// Queue a success envelope delivered only after `delay`.
    pub fn queue_delayed(&self, endpoint: Endpoint, delay: Duration, content: Value) {
        self.queue(
            endpoint,
            MockReply::Delayed(delay, RawEnvelope::success(content)),
        );
    }

    /// Queue a transport failure.
    pub fn queue_unreachable(&self, endpoint: Endpoint) {
        self.queue(endpoint, MockReply::Unreachable);
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    /// Calls received for one endpoint, oldest first.
    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<RecordedCall> {
        self.state()
            .calls
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .cloned()
            .collect()
    }

    /// Number of replies still queued for `endpoint`.
    pub fn pending(&self, endpoint: Endpoint) -> usize {
        self.state().replies.get(&endpoint).map_or(0, VecDeque::len)
    }

    async fn respond(&self, endpoint: Endpoint, params: Value) -> TransportResult<RawEnvelope> {
        // The call is recorded and its reply taken before any delay, so
        // calls keep their issue order even when replies complete out of it.
        let reply = {
            let mut state = self.state();
            state.calls.push(RecordedCall { endpoint, params });
            state
                .replies
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
        };

        match reply {
            Some(MockReply::Envelope(envelope)) => Ok(envelope),
            Some(MockReply::Delayed(delay, envelope)) => {
                tokio::time::sleep(delay).await;
                Ok(envelope)
            }
            Some(MockReply::Timeout) => Err(TransportError::Timeout(0)),
            Some(MockReply::Unreachable) => Err(TransportError::Connection(format!(
                "mock: {endpoint} unreachable"
            ))),
            None => Err(TransportError::Connection(format!(
                "mock: no reply scripted for {endpoint}"
            ))),
        }
    }
}

fn to_params<T: serde::Serialize>(request: &T) -> Value {
    serde_json::to_value(request).unwrap_or(Value::Null)
}

impl LockApi for MockLockApi {
    async fn login(&self, request: &LoginRequest) -> TransportResult<RawEnvelope> {
        self.respond(Endpoint::Login, to_params(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> TransportResult<RawEnvelope> {
        self.respond(Endpoint::Register, to_params(request)).await
    }

    async fn reset(&self, session_id: &str) -> TransportResult<RawEnvelope> {
        self.respond(Endpoint::Reset, json!({ "sessionId": session_id })).await
    }

    async fn get_user_list(&self, session_id: &str) -> TransportResult<RawEnvelope> {
        self.respond(Endpoint::UserList, json!({ "sessionId": session_id })).await
    }

    async fn create_user(&self, request: &CreateMemberRequest) -> TransportResult<RawEnvelope> {
        self.respond(Endpoint::CreateUser, to_params(request)).await
    }

    async fn start_biometric_data(
        &self,
        request: &BiometricRequest,
    ) -> TransportResult<RawEnvelope> {
        self.respond(Endpoint::StartBiometric, to_params(request)).await
    }

    async fn get_image_paths(
        &self,
        username: &str,
        session_id: &str,
    ) -> TransportResult<RawEnvelope> {
        self.respond(
            Endpoint::ImagePaths,
            json!({ "username": username, "sessionId": session_id }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_consumed_in_order() {
        let api = MockLockApi::new();
        api.queue_success(Endpoint::CreateUser, json!(1));
        api.queue_error(Endpoint::CreateUser, ErrorCode::NameAlreadyInUse);
        assert_eq!(api.pending(Endpoint::CreateUser), 2);

        let request = CreateMemberRequest::new("Bob", "member", "tok");
        let first = api.create_user(&request).await.unwrap();
        let second = api.create_user(&request).await.unwrap();

        assert!(!first.error);
        assert_eq!(first.content, json!(1));
        assert!(second.error);
        assert_eq!(second.error_code, Some(ErrorCode::NameAlreadyInUse));
        assert_eq!(api.pending(Endpoint::CreateUser), 0);
    }

    #[tokio::test]
    async fn test_unscripted_endpoint_is_unreachable() {
        let api = MockLockApi::new();
        let result = api.get_user_list("tok").await;
        assert!(matches!(result, Err(TransportError::Connection(_))));
    }

    #[tokio::test]
    async fn test_scripted_timeout() {
        let api = MockLockApi::new();
        api.queue(Endpoint::Reset, MockReply::Timeout);
        assert!(matches!(
            api.reset("tok").await,
            Err(TransportError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_calls_recorded_with_params() {
        let api = MockLockApi::new();
        api.queue_success(Endpoint::StartBiometric, json!("bio-1"));

        api.start_biometric_data(&BiometricRequest::new(9, "tok"))
            .await
            .unwrap();
        let _ = api.get_image_paths("Bob", "tok").await;

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].endpoint, Endpoint::StartBiometric);
        assert_eq!(calls[0].params, json!({"userId": 9, "sessionId": "tok"}));
        assert_eq!(
            api.calls_to(Endpoint::ImagePaths)[0].params,
            json!({"username": "Bob", "sessionId": "tok"})
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_reply_completes_after_later_call() {
        let api = MockLockApi::new();
        api.queue_delayed(Endpoint::CreateUser, Duration::from_millis(200), json!(1));
        api.queue_success(Endpoint::CreateUser, json!(2));

        let slow = {
            let api = api.clone();
            tokio::spawn(async move {
                api.create_user(&CreateMemberRequest::new("Bob", "member", "tok"))
                    .await
            })
        };
        tokio::task::yield_now().await;

        let fast = api
            .create_user(&CreateMemberRequest::new("Eve", "member", "tok"))
            .await
            .unwrap();
        assert_eq!(fast.content, json!(2));
        assert!(!slow.is_finished());

        let slow = slow.await.unwrap().unwrap();
        assert_eq!(slow.content, json!(1));
        assert_eq!(api.calls_to(Endpoint::CreateUser)[0].params["name"], "Bob");
    }

    #[tokio::test]
    async fn test_clones_share_script() {
        let api = MockLockApi::new();
        let clone = api.clone();
        clone.queue_success(Endpoint::Login, json!("tok"));

        assert!(api.login(&LoginRequest::new("a", "b")).await.is_ok());
        assert_eq!(clone.calls().len(), 1);
    }
}
