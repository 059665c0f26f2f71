//! JSON request bodies, one per `POST` endpoint.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    /// Serial number printed on the lock
    pub serial_number: String,
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            serial_number: serial_number.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub name: String,
    pub role: String,
    pub session_id: String,
}

impl CreateMemberRequest {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            session_id: session_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricRequest {
    pub user_id: i64,
    pub session_id: String,
}

impl BiometricRequest {
    pub fn new(user_id: i64, session_id: impl Into<String>) -> Self {
        Self {
            user_id,
            session_id: session_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_field_names() {
        assert_eq!(
            serde_json::to_value(RegisterRequest::new("alice", "SN-1")).unwrap(),
            json!({"username": "alice", "serialNumber": "SN-1"})
        );
        assert_eq!(
            serde_json::to_value(CreateMemberRequest::new("Bob", "member", "tok")).unwrap(),
            json!({"name": "Bob", "role": "member", "sessionId": "tok"})
        );
        assert_eq!(
            serde_json::to_value(BiometricRequest::new(5, "tok")).unwrap(),
            json!({"userId": 5, "sessionId": "tok"})
        );
        assert_eq!(
            serde_json::to_value(ResetRequest {
                session_id: "tok".to_string()
            })
            .unwrap(),
            json!({"sessionId": "tok"})
        );
    }
}
