//! HTTP client for the lock server REST interface.
//!
//! This module provides [`HttpLockClient`], the production implementation of
//! [`LockApi`]. Requests are JSON over HTTP via `reqwest`; responses are
//! parsed into [`RawEnvelope`] and handed back undecoded.
//!
//! # Architecture
//!
//! ```text
//! SessionRepository / HouseholdMemberRepository
//!     │
//!     └─> HttpLockClient ───(HTTP)───> Lock Server
//!            │
//!            └─> SessionStore (server address, read per request)
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use homelock_core::SessionStore;
//! use homelock_network::{ClientConfig, HttpLockClient, LockApi, LoginRequest};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::with_server_address("192.168.0.100"));
//! let config = ClientConfig::new().timeout(Duration::from_millis(3000));
//!
//! let client = HttpLockClient::new(config, session)?;
//! let envelope = client.login(&LoginRequest::new("alice", "secret")).await?;
//! println!("error flag: {}", envelope.error);
//! # Ok(())
//! # }
//! ```
//!
//! # Design Principles
//!
//! - **No automatic retry**: one call, one request
//! - **No cancellation**: a request runs until it completes, fails or times out
//! - **Late address binding**: the server address is read from the session on
//!   every request, so a newly discovered lock is used immediately
//!
//! # Failure Mapping
//!
//! | Situation | Error |
//! |-----------|-------|
//! | no address in session | [`TransportError::Core`] |
//! | timeout | [`TransportError::Timeout`] |
//! | connect refused / unreachable | [`TransportError::Connection`] |
//! | non-2xx status | [`TransportError::UnexpectedStatus`] |
//! | body is not an envelope | [`TransportError::MalformedEnvelope`] |

use crate::api::{Endpoint, LockApi};
use crate::envelope::RawEnvelope;
use crate::error::{TransportError, TransportResult};
use crate::request::{
    BiometricRequest, CreateMemberRequest, LoginRequest, RegisterRequest, ResetRequest,
};
use homelock_core::constants::{
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SCHEME, DEFAULT_SERVER_PORT, DEFAULT_USER_AGENT,
    QUERY_SESSION_ID, QUERY_USERNAME,
};
use homelock_core::{Error, SessionStore};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use std::net::Ipv6Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Configuration for the HTTP client
///
/// # Example
///
/// ```
/// use homelock_network::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new()
///     .default_port(9000)
///     .timeout(Duration::from_millis(5000));
/// assert_eq!(config.scheme, "http");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme used when the server address carries none
    pub scheme: String,

    /// Port used when the server address carries neither scheme nor port.
    /// A full URL such as `http://10.0.0.1` keeps its scheme's default port.
    pub default_port: u16,

    /// Timeout for a whole request (connect, send, receive)
    pub timeout: Duration,

    /// User agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            default_port: DEFAULT_SERVER_PORT,
            timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Check the configuration before building a client.
    ///
    /// # Errors
    /// Returns `Error::Config` if the scheme is not `http`/`https`, the port
    /// is zero, or the timeout is zero.
    pub fn validate(&self) -> homelock_core::Result<()> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(Error::Config(format!(
                "unsupported scheme '{}', expected http or https",
                self.scheme
            )));
        }
        if self.default_port == 0 {
            return Err(Error::Config("default port must be non-zero".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// HTTP client for the lock server
///
/// Cheap to share: wrap it in an `Arc` and hand it to every repository.
/// `reqwest` pools connections internally.
pub struct HttpLockClient {
    http: Client,
    session: Arc<SessionStore>,
    config: ClientConfig,
}

impl HttpLockClient {
    /// Create a client bound to `session` for server address lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the underlying
    /// HTTP client cannot be constructed.
    pub fn new(config: ClientConfig, session: Arc<SessionStore>) -> TransportResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        debug!(
            timeout_ms = config.timeout.as_millis() as u64,
            default_port = config.default_port,
            "Created lock server HTTP client"
        );

        Ok(Self {
            http,
            session,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Root URL of the server currently stored in the session.
    fn base_url(&self) -> TransportResult<Url> {
        let address = self.session.require_server_address()?;
        let has_scheme = address.contains("://");

        // Bare IPv6 literals need brackets before a port can follow.
        let host = if !has_scheme && address.parse::<Ipv6Addr>().is_ok() {
            format!("[{address}]")
        } else {
            address.clone()
        };

        let raw = if has_scheme {
            host.clone()
        } else {
            format!("{}://{}", self.config.scheme, host)
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| Error::InvalidAddress(format!("{address}: {e}")))?;

        if !has_scheme && url.port().is_none() && !has_explicit_port(&host) {
            url.set_port(Some(self.config.default_port))
                .map_err(|()| Error::InvalidAddress(address.clone()))?;
        }

        Ok(url)
    }

    fn url_for(&self, endpoint: Endpoint) -> TransportResult<Url> {
        self.base_url()?
            .join(endpoint.path())
            .map_err(|e| TransportError::InvalidUrl(e.to_string()))
    }

    async fn post<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> TransportResult<RawEnvelope> {
        let url = self.url_for(endpoint)?;
        trace!(endpoint = %endpoint, path = endpoint.path(), "Sending POST request");
        self.execute(endpoint, self.http.post(url).json(body)).await
    }

    async fn get(
        &self,
        endpoint: Endpoint,
        query: &[(&str, &str)],
    ) -> TransportResult<RawEnvelope> {
        let url = self.url_for(endpoint)?;
        trace!(endpoint = %endpoint, path = endpoint.path(), "Sending GET request");
        self.execute(endpoint, self.http.get(url).query(query)).await
    }

    async fn execute(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> TransportResult<RawEnvelope> {
        let response = request
            .send()
            .await
            .map_err(|e| self.map_transport_error(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, status = status.as_u16(), "Unexpected HTTP status");
            return Err(TransportError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(endpoint, e))?;

        let envelope: RawEnvelope = serde_json::from_slice(&body).map_err(|e| {
            warn!(endpoint = %endpoint, error = %e, "Response body is not an envelope");
            TransportError::MalformedEnvelope(e.to_string())
        })?;

        debug!(
            endpoint = %endpoint,
            error = envelope.error,
            error_code = ?envelope.error_code,
            "Received envelope"
        );
        Ok(envelope)
    }

    fn map_transport_error(&self, endpoint: Endpoint, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            let timeout_ms = self.config.timeout.as_millis() as u64;
            warn!(endpoint = %endpoint, timeout_ms, "Request timeout");
            TransportError::Timeout(timeout_ms)
        } else if err.is_connect() {
            warn!(endpoint = %endpoint, error = %err, "Connection failed");
            TransportError::Connection(err.to_string())
        } else {
            warn!(endpoint = %endpoint, error = %err, "Request failed");
            TransportError::Http(err)
        }
    }
}

/// Whether `address` (no scheme, IPv6 bracketed) ends in `:<port>`.
fn has_explicit_port(address: &str) -> bool {
    address
        .rsplit_once(':')
        .is_some_and(|(_, port)| port.parse::<u16>().is_ok())
}

impl LockApi for HttpLockClient {
    async fn login(&self, request: &LoginRequest) -> TransportResult<RawEnvelope> {
        self.post(Endpoint::Login, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> TransportResult<RawEnvelope> {
        self.post(Endpoint::Register, request).await
    }

    async fn reset(&self, session_id: &str) -> TransportResult<RawEnvelope> {
        let body = ResetRequest {
            session_id: session_id.to_string(),
        };
        self.post(Endpoint::Reset, &body).await
    }

    async fn get_user_list(&self, session_id: &str) -> TransportResult<RawEnvelope> {
        self.get(Endpoint::UserList, &[(QUERY_SESSION_ID, session_id)]).await
    }

    async fn create_user(&self, request: &CreateMemberRequest) -> TransportResult<RawEnvelope> {
        self.post(Endpoint::CreateUser, request).await
    }

    async fn start_biometric_data(
        &self,
        request: &BiometricRequest,
    ) -> TransportResult<RawEnvelope> {
        self.post(Endpoint::StartBiometric, request).await
    }

    async fn get_image_paths(
        &self,
        username: &str,
        session_id: &str,
    ) -> TransportResult<RawEnvelope> {
        self.get(
            Endpoint::ImagePaths,
            &[(QUERY_USERNAME, username), (QUERY_SESSION_ID, session_id)],
        )
        .await
    }
}
