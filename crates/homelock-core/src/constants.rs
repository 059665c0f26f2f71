//! Core constants for the lock server REST interface.
//!
//! This module defines the endpoint paths, query parameter names, error
//! code strings and transport defaults shared by every crate in the
//! workspace.
//!
//! # Envelope Structure
//!
//! Every lock server response body is a JSON envelope:
//!
//! ```text
//! {"error": false, "content": <payload>}
//! {"error": true,  "errorCode": "ERROR_..."}
//! ```
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `error` | Whether the server rejected the request |
//! | `errorCode` | Enumerated reason, present only on error (older firmware: `errorMessage`) |
//! | `content` | Operation-specific payload, present only on success |
//!
//! Field names are bound by the serde attributes on `RawEnvelope` in the
//! network crate.
//!
//! # Usage
//!
//! ```
//! use homelock_core::constants::*;
//!
//! assert_eq!(PATH_LOGIN, "/login");
//! assert_eq!(ERROR_NAME_ALREADY_IN_USE, "ERROR_NAME_ALREADY_IN_USE");
//!
//! use std::time::Duration;
//! let timeout = Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS);
//! assert_eq!(timeout.as_secs(), 10);
//! ```

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Administrator login. Success content is the session token.
pub const PATH_LOGIN: &str = "/login";

/// Administrator registration. Success content is the admin record.
pub const PATH_REGISTER: &str = "/register";

/// Remote reset of all household state. Success content is passed through.
///
/// # Warning
///
/// This is destructive and cannot be undone from the client.
pub const PATH_RESET: &str = "/reset";

/// Household members. `GET` lists them, `POST` creates one.
pub const PATH_USERS: &str = "/users";

/// Starts biometric enrollment on the lock for one member.
pub const PATH_BIOMETRIC: &str = "/biometric";

/// Image paths captured for one member.
pub const PATH_IMAGES: &str = "/images";

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameter carrying the session token on `GET` endpoints.
pub const QUERY_SESSION_ID: &str = "sessionId";

/// Query parameter carrying the member name on `GET` endpoints.
pub const QUERY_USERNAME: &str = "username";

// ============================================================================
// Server Error Codes
// ============================================================================

/// The session token is unknown or has expired; log in again.
pub const ERROR_EXPIRED_SESSION_ID: &str = "ERROR_EXPIRED_SESSION_ID";

/// One or more required request parameters were missing.
pub const ERROR_MISSING_REQUIRED_PARAMETERS: &str = "ERROR_MISSING_REQUIRED_PARAMETERS";

/// The lock server failed to read or write its database.
pub const ERROR_DATABASE_ERROR: &str = "ERROR_DATABASE_ERROR";

/// An administrator is already registered on this lock.
pub const ERROR_ADMIN_ALREADY_EXISTS: &str = "ERROR_ADMIN_ALREADY_EXISTS";

/// The serial number does not match the lock.
pub const ERROR_WRONG_SERIAL_ID: &str = "ERROR_WRONG_SERIAL_ID";

/// A household member with this name already exists.
pub const ERROR_NAME_ALREADY_IN_USE: &str = "ERROR_NAME_ALREADY_IN_USE";

/// The server could not reach the locking device.
pub const ERROR_LOCKING_DEVICE_NOT_FOUND: &str = "ERROR_LOCKING_DEVICE_NOT_FOUND";

/// The requested username is shorter than the server allows.
pub const ERROR_USERNAME_TOO_SHORT: &str = "ERROR_USERNAME_TOO_SHORT";

// ============================================================================
// Transport Defaults
// ============================================================================

/// URL scheme used when the server address carries none.
pub const DEFAULT_SCHEME: &str = "http";

/// Port used when the server address carries none.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default timeout for a single request (milliseconds).
///
/// Covers connect, send and receive of one call. There is no retry on top
/// of it; a timed out request is reported to the caller as a transport
/// failure.
///
/// # Value: 10000ms
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("homelock/", env!("CARGO_PKG_VERSION"));
