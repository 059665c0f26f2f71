//! Property-based tests for envelope decoding.
//!
//! These tests use proptest to generate arbitrary server payloads and verify
//! that decoding keeps success content intact and always collapses error
//! envelopes to the zero sentinel.

use homelock_core::{ErrorCode, HouseholdMember};
use homelock_network::{
    BiometricToken, Content, Endpoint, ImagePaths, MemberId, MemberList, RawEnvelope,
};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for household members with printable names and roles.
fn member() -> impl Strategy<Value = HouseholdMember> {
    (
        any::<i64>(),
        prop::string::string_regex("[A-Za-z ]{1,24}")
            .expect("Failed to create name regex strategy"),
        prop_oneof![Just("member"), Just("child"), Just("guest"), Just("admin")],
    )
        .prop_map(|(id, name, role)| HouseholdMember {
            id,
            name,
            role: role.to_string(),
        })
}

/// Strategy for any error code, known or not.
fn error_code() -> impl Strategy<Value = ErrorCode> {
    prop_oneof![
        Just(ErrorCode::ExpiredSessionId),
        Just(ErrorCode::MissingRequiredParameters),
        Just(ErrorCode::DatabaseError),
        Just(ErrorCode::AdminAlreadyExists),
        Just(ErrorCode::WrongSerialId),
        Just(ErrorCode::NameAlreadyInUse),
        Just(ErrorCode::LockingDeviceNotFound),
        Just(ErrorCode::UsernameTooShort),
        "[A-Z_]{3,30}".prop_map(ErrorCode::from),
    ]
}

/// Strategy for arbitrary JSON payloads a misbehaving server might attach.
fn payload() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,16}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::hash_map("[a-z]{1,8}", inner, 0..4)
                .prop_map(|map| json!(map)),
        ]
    })
}

proptest! {
    /// Member lists keep their order and every field.
    #[test]
    fn prop_member_list_preserved(members in prop::collection::vec(member(), 0..20)) {
        let envelope = RawEnvelope::success(serde_json::to_value(&members).unwrap());
        let response = envelope.decode::<MemberList>(Endpoint::UserList).unwrap();

        prop_assert!(!response.error);
        prop_assert_eq!(response.content, Content::Value(members));
    }

    /// Created member identifiers survive decoding unchanged.
    #[test]
    fn prop_member_id_preserved(id in any::<i64>()) {
        let response = RawEnvelope::success(json!(id))
            .decode::<MemberId>(Endpoint::CreateUser)
            .unwrap();

        prop_assert_eq!(response.content, Content::Value(id));
    }

    /// String payloads survive decoding unchanged.
    #[test]
    fn prop_string_payload_preserved(
        token in ".{0,64}",
        paths in prop::collection::vec("[a-z0-9/._-]{1,40}", 0..8),
    ) {
        let response = RawEnvelope::success(json!(token))
            .decode::<BiometricToken>(Endpoint::StartBiometric)
            .unwrap();
        prop_assert_eq!(response.content, Content::Value(token));

        let response = RawEnvelope::success(json!(paths))
            .decode::<ImagePaths>(Endpoint::ImagePaths)
            .unwrap();
        prop_assert_eq!(response.content, Content::Value(paths));
    }

    /// Error envelopes always decode to the zero sentinel, whatever the payload.
    #[test]
    fn prop_error_envelope_is_zero(code in error_code(), content in payload()) {
        let envelope = RawEnvelope {
            error: true,
            error_code: Some(code.clone()),
            content,
        };

        let response = envelope.decode::<MemberList>(Endpoint::UserList).unwrap();

        prop_assert!(response.error);
        prop_assert!(response.content.is_zero());
        prop_assert_eq!(response.error_code, Some(code));
    }

    /// Error codes survive a trip through the wire envelope.
    #[test]
    fn prop_error_code_wire_text(code in error_code()) {
        let wire = serde_json::to_string(&RawEnvelope::failure(code.clone())).unwrap();
        let parsed: RawEnvelope = serde_json::from_str(&wire).unwrap();

        prop_assert_eq!(parsed.error_code, Some(code));
    }
}
