use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Session token issued by the lock server on login.
///
/// Empty until the first successful login. The token is redacted from
/// `Debug` output so it never ends up in logs.
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when tokens are compared.
///
/// # Examples
///
/// ```
/// use homelock_core::SessionToken;
///
/// let token = SessionToken::new("tok-123");
/// assert_eq!(token.as_str(), "tok-123");
/// assert!(!token.is_empty());
/// assert!(SessionToken::default().is_empty());
/// assert_eq!(format!("{token:?}"), "SessionToken(<redacted>)");
/// ```
#[derive(Clone, Default, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token string received from the server.
    pub fn new(token: impl Into<String>) -> Self {
        SessionToken(token.into())
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no token has been issued yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("SessionToken(<empty>)")
        } else {
            f.write_str("SessionToken(<redacted>)")
        }
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionToken {
    fn from(token: &str) -> Self {
        SessionToken::new(token)
    }
}

impl From<String> for SessionToken {
    fn from(token: String) -> Self {
        SessionToken(token)
    }
}

/// Constant-time comparison implementation for SessionToken
impl PartialEq for SessionToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

/// A person registered under the household's lock profile.
///
/// Only ever produced by decoding a member list returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMember {
    /// Server-assigned member id
    pub id: i64,

    /// Display name, unique per household
    pub name: String,

    /// Free-form role label (e.g. "member", "child")
    pub role: String,
}

/// Administrator record returned by a successful registration.
///
/// The password is generated by the lock server; the client never chooses
/// it. It is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    /// Administrator user id, also used as the biometric enrollment target
    pub id: i64,

    /// Server-issued password for subsequent logins
    pub password: String,

    /// Username echoed back by servers that include it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}
