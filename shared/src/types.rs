//! API request and response types

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

/// Registration request
///
/// Missing fields deserialize as empty so they surface as validation
/// failures rather than body rejections.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Public view of a registered user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_register_request_missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(req.email, "a@x.com");
        assert!(req.name.is_empty());
        assert!(req.password.expose_secret().is_empty());
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"hunter22"}"#).unwrap();
        let debug = format!("{:?}", req);
        assert!(!debug.contains("hunter22"));
        assert_eq!(req.password.expose_secret(), "hunter22");
    }

    #[test]
    fn test_login_response_shape() {
        let body = serde_json::to_value(LoginResponse {
            message: "Login successful".to_string(),
            token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["token"], "abc");
    }
}
