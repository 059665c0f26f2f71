//! Response envelope and typed decoding.
//!
//! Every lock server reply is a [`RawEnvelope`]: an error flag, an optional
//! error code and an untyped JSON payload. [`RawEnvelope::decode`] turns it
//! into an [`ApiResponse<T>`] whose content has the shape the calling
//! operation expects:
//!
//! | Operation | Content shape |
//! |-----------|---------------|
//! | member list | [`MemberList`] |
//! | create member | [`MemberId`] |
//! | biometric start | [`BiometricToken`] |
//! | registration | [`Admin`](homelock_core::Admin) |
//! | login | [`SessionToken`](homelock_core::SessionToken) |
//! | reset | [`Passthrough`] |
//! | image paths | [`ImagePaths`] |
//!
//! # Error Envelopes
//!
//! When the error flag is set the payload is discarded and the content
//! becomes [`Content::Zero`], whatever `T` is. This is what observers of a
//! failed call see; they branch on the error code, never on the content.

use crate::api::Endpoint;
use crate::error::DecodeError;
use homelock_core::{ErrorCode, HouseholdMember};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Content of a successful member-list call.
pub type MemberList = Vec<HouseholdMember>;

/// Content of a successful create-member call.
pub type MemberId = i64;

/// Content of a successful biometric-start call.
pub type BiometricToken = String;

/// Content of a successful reset call, passed through unchanged.
pub type Passthrough = Value;

/// Content of a successful image-paths call.
pub type ImagePaths = Vec<String>;

/// Envelope exactly as it arrives on the wire.
///
/// # Examples
///
/// ```
/// use homelock_network::RawEnvelope;
///
/// let raw: RawEnvelope =
///     serde_json::from_str(r#"{"error":true,"errorCode":"ERROR_DATABASE_ERROR"}"#).unwrap();
/// assert!(raw.error);
/// assert!(raw.content.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEnvelope {
    /// Whether the server rejected the request
    pub error: bool,

    /// Reason for the rejection, meaningful only when `error` is set
    #[serde(default, alias = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,

    /// Operation-specific payload, meaningful only when `error` is unset
    #[serde(default)]
    pub content: Value,
}

impl RawEnvelope {
    /// Success envelope carrying `content`.
    pub fn success(content: Value) -> Self {
        Self {
            error: false,
            error_code: None,
            content,
        }
    }

    /// Error envelope carrying `code`.
    pub fn failure(code: ErrorCode) -> Self {
        Self {
            error: true,
            error_code: Some(code),
            content: Value::Null,
        }
    }

    /// Interpret the envelope as the response of `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the envelope reports success but its
    /// content does not deserialize into `T`. Error envelopes never fail to
    /// decode.
    ///
    /// # Examples
    ///
    /// ```
    /// use homelock_network::{Content, Endpoint, MemberId, RawEnvelope};
    /// use serde_json::json;
    ///
    /// let response = RawEnvelope::success(json!(17))
    ///     .decode::<MemberId>(Endpoint::CreateUser)
    ///     .unwrap();
    /// assert_eq!(response.content, Content::Value(17));
    /// ```
    pub fn decode<T: DeserializeOwned>(
        self,
        endpoint: Endpoint,
    ) -> Result<ApiResponse<T>, DecodeError> {
        if self.error {
            return Ok(ApiResponse::server_error(self.error_code));
        }

        let value = serde_json::from_value(self.content)
            .map_err(|source| DecodeError { endpoint, source })?;
        Ok(ApiResponse::success(value))
    }
}

/// Content slot of a decoded envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<T> {
    /// Nothing received yet
    Empty,

    /// Sentinel left in place of the payload of an error envelope
    Zero,

    /// Decoded payload of a success envelope
    Value(T),
}

impl<T> Default for Content<T> {
    fn default() -> Self {
        Content::Empty
    }
}

impl<T> Content<T> {
    /// Borrow the decoded payload, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Content::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Take the decoded payload, if any.
    pub fn into_value(self) -> Option<T> {
        match self {
            Content::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Content::Zero)
    }
}

/// Serializes as the payload, the integer `0`, or `null`.
impl<T: Serialize> Serialize for Content<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Empty => serializer.serialize_none(),
            Content::Zero => serializer.serialize_i64(0),
            Content::Value(value) => value.serialize(serializer),
        }
    }
}

/// Decoded envelope as published to observers.
///
/// Exactly one of `error_code` and `content` is meaningful: an error
/// response always carries [`Content::Zero`], a success response always
/// carries [`Content::Value`]. The [`Default`] value (no error, empty
/// content) stands for "no response received yet".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub error: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,

    pub content: Content<T>,
}

impl<T> Default for ApiResponse<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> ApiResponse<T> {
    /// Placeholder held by a slot before its first response.
    pub fn empty() -> Self {
        Self {
            error: false,
            error_code: None,
            content: Content::Empty,
        }
    }

    pub fn success(value: T) -> Self {
        Self {
            error: false,
            error_code: None,
            content: Content::Value(value),
        }
    }

    pub fn server_error(code: Option<ErrorCode>) -> Self {
        Self {
            error: true,
            error_code: code,
            content: Content::Zero,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Whether this is the placeholder rather than a real response.
    pub fn is_empty(&self) -> bool {
        !self.error && matches!(self.content, Content::Empty)
    }

    pub fn value(&self) -> Option<&T> {
        self.content.value()
    }

    /// Collapse into the payload or the server's error code.
    ///
    /// Returns `Ok(None)` for the empty placeholder.
    pub fn into_result(self) -> Result<Option<T>, Option<ErrorCode>> {
        if self.error {
            Err(self.error_code)
        } else {
            Ok(self.content.into_value())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homelock_core::{Admin, SessionToken};
    use rstest::rstest;
    use serde_json::json;

    fn raw(json: &str) -> RawEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_login_success_decodes_token() {
        let response = raw(r#"{"error":false,"content":"tok-123"}"#)
            .decode::<SessionToken>(Endpoint::Login)
            .unwrap();

        assert!(!response.error);
        assert_eq!(response.content, Content::Value(SessionToken::new("tok-123")));
        assert!(response.error_code.is_none());
    }

    #[test]
    fn test_member_list_decodes_members() {
        let response = raw(r#"{"error":false,"content":[{"id":1,"name":"Bob","role":"member"}]}"#)
            .decode::<MemberList>(Endpoint::UserList)
            .unwrap();

        assert_eq!(
            response.value().unwrap(),
            &vec![HouseholdMember {
                id: 1,
                name: "Bob".to_string(),
                role: "member".to_string(),
            }]
        );
    }

    #[test]
    fn test_error_envelope_becomes_zero() {
        let response = raw(r#"{"error":true,"errorCode":"ERROR_NAME_ALREADY_IN_USE"}"#)
            .decode::<MemberId>(Endpoint::CreateUser)
            .unwrap();

        assert!(response.error);
        assert_eq!(response.content, Content::Zero);
        assert_eq!(response.error_code, Some(ErrorCode::NameAlreadyInUse));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": true, "errorCode": "ERROR_NAME_ALREADY_IN_USE", "content": 0})
        );
    }

    #[test]
    fn test_error_envelope_discards_payload() {
        let response = raw(
            r#"{"error":true,"errorCode":"ERROR_DATABASE_ERROR","content":{"id":3,"password":"p"}}"#,
        )
        .decode::<Admin>(Endpoint::Register)
        .unwrap();

        assert!(response.content.is_zero());
        assert!(response.value().is_none());
    }

    #[test]
    fn test_error_message_alias_accepted() {
        let envelope = raw(r#"{"error":true,"errorMessage":"ERROR_WRONG_SERIAL_ID"}"#);
        assert_eq!(envelope.error_code, Some(ErrorCode::WrongSerialId));
    }

    #[test]
    fn test_raw_envelope_wire_names() {
        assert_eq!(
            serde_json::to_value(RawEnvelope::failure(ErrorCode::DatabaseError)).unwrap(),
            json!({"error": true, "errorCode": "ERROR_DATABASE_ERROR", "content": null})
        );
        assert_eq!(
            serde_json::to_value(RawEnvelope::success(json!([1]))).unwrap(),
            json!({"error": false, "content": [1]})
        );
    }

    #[test]
    fn test_error_without_code() {
        let response = raw(r#"{"error":true}"#)
            .decode::<BiometricToken>(Endpoint::StartBiometric)
            .unwrap();
        assert!(response.error);
        assert!(response.error_code.is_none());
        assert!(response.content.is_zero());
    }

    #[test]
    fn test_reset_passes_content_through() {
        let content = json!({"removed": 4, "ok": true});
        let response = RawEnvelope::success(content.clone())
            .decode::<Passthrough>(Endpoint::Reset)
            .unwrap();
        assert_eq!(response.content, Content::Value(content));
    }

    #[rstest]
    #[case::string_as_id(Endpoint::CreateUser, r#""seven""#)]
    #[case::object_as_list(Endpoint::UserList, r#"{"id":1}"#)]
    #[case::null_as_token(Endpoint::Login, "null")]
    fn test_shape_mismatch_is_decode_error(#[case] endpoint: Endpoint, #[case] content: &str) {
        let envelope = RawEnvelope::success(serde_json::from_str(content).unwrap());
        let result = match endpoint {
            Endpoint::CreateUser => envelope.decode::<MemberId>(endpoint).map(|_| ()),
            Endpoint::UserList => envelope.decode::<MemberList>(endpoint).map(|_| ()),
            _ => envelope.decode::<SessionToken>(endpoint).map(|_| ()),
        };

        let err = result.unwrap_err();
        assert_eq!(err.endpoint, endpoint);
    }

    #[test]
    fn test_empty_placeholder() {
        let response = ApiResponse::<MemberList>::default();
        assert!(response.is_empty());
        assert!(!response.is_error());
        assert_eq!(response.into_result(), Ok(None));
        assert_eq!(
            serde_json::to_value(ApiResponse::<MemberId>::empty()).unwrap(),
            json!({"error": false, "content": null})
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::success(5_i64).into_result(), Ok(Some(5)));
        assert_eq!(
            ApiResponse::<i64>::server_error(Some(ErrorCode::DatabaseError)).into_result(),
            Err(Some(ErrorCode::DatabaseError))
        );
    }
}
