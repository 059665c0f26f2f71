//! Error codes reported by the lock server inside a failed envelope.

use crate::constants::{
    ERROR_ADMIN_ALREADY_EXISTS, ERROR_DATABASE_ERROR, ERROR_EXPIRED_SESSION_ID,
    ERROR_LOCKING_DEVICE_NOT_FOUND, ERROR_MISSING_REQUIRED_PARAMETERS, ERROR_NAME_ALREADY_IN_USE,
    ERROR_USERNAME_TOO_SHORT, ERROR_WRONG_SERIAL_ID,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enumerated reason for a server-side rejection.
///
/// Codes this client does not know are kept verbatim in
/// [`ErrorCode::Unknown`] so callers can still log or display them.
///
/// # Examples
///
/// ```
/// use homelock_core::ErrorCode;
///
/// let code: ErrorCode = "ERROR_WRONG_SERIAL_ID".parse().unwrap();
/// assert_eq!(code, ErrorCode::WrongSerialId);
/// assert_eq!(code.as_str(), "ERROR_WRONG_SERIAL_ID");
///
/// let other: ErrorCode = "ERROR_LOCK_JAMMED".parse().unwrap();
/// assert_eq!(other, ErrorCode::Unknown("ERROR_LOCK_JAMMED".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    ExpiredSessionId,
    MissingRequiredParameters,
    DatabaseError,
    AdminAlreadyExists,
    WrongSerialId,
    NameAlreadyInUse,
    LockingDeviceNotFound,
    UsernameTooShort,
    Unknown(String),
}

impl ErrorCode {
    /// Wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::ExpiredSessionId => ERROR_EXPIRED_SESSION_ID,
            ErrorCode::MissingRequiredParameters => ERROR_MISSING_REQUIRED_PARAMETERS,
            ErrorCode::DatabaseError => ERROR_DATABASE_ERROR,
            ErrorCode::AdminAlreadyExists => ERROR_ADMIN_ALREADY_EXISTS,
            ErrorCode::WrongSerialId => ERROR_WRONG_SERIAL_ID,
            ErrorCode::NameAlreadyInUse => ERROR_NAME_ALREADY_IN_USE,
            ErrorCode::LockingDeviceNotFound => ERROR_LOCKING_DEVICE_NOT_FOUND,
            ErrorCode::UsernameTooShort => ERROR_USERNAME_TOO_SHORT,
            ErrorCode::Unknown(code) => code,
        }
    }

    /// Short message suitable for showing to the person holding the phone.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ExpiredSessionId => "Session expired, log in again",
            ErrorCode::MissingRequiredParameters => "Request is missing required parameters",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::AdminAlreadyExists => "An administrator already exists for this lock",
            ErrorCode::WrongSerialId => "Wrong serial number",
            ErrorCode::NameAlreadyInUse => "Name already in use",
            ErrorCode::LockingDeviceNotFound => "Could not contact the lock",
            ErrorCode::UsernameTooShort => "Username is too short",
            ErrorCode::Unknown(_) => "Unknown server error",
        }
    }

    /// Whether the caller should obtain a fresh session token and try again.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ErrorCode::ExpiredSessionId)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            ERROR_EXPIRED_SESSION_ID => ErrorCode::ExpiredSessionId,
            ERROR_MISSING_REQUIRED_PARAMETERS => ErrorCode::MissingRequiredParameters,
            ERROR_DATABASE_ERROR => ErrorCode::DatabaseError,
            ERROR_ADMIN_ALREADY_EXISTS => ErrorCode::AdminAlreadyExists,
            ERROR_WRONG_SERIAL_ID => ErrorCode::WrongSerialId,
            ERROR_NAME_ALREADY_IN_USE => ErrorCode::NameAlreadyInUse,
            ERROR_LOCKING_DEVICE_NOT_FOUND => ErrorCode::LockingDeviceNotFound,
            ERROR_USERNAME_TOO_SHORT => ErrorCode::UsernameTooShort,
            other => ErrorCode::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        ErrorCode::from(code.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Unknown(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ErrorCode::from(s))
    }
}
