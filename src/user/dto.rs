//! Request and response bodies of the `/user` routes.
//!
//! Request DTOs are decoded with `#[serde(default)]`, so a missing field is
//! an empty string and is reported by validation (400), not by decoding.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::GatewayError;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ConfirmUserRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "confirmation code is required"))]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ResendConfirmationRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Query string of `GET /user/check-username-taken`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

impl UsernameQuery {
    /// The `username` parameter; absent and empty are both missing.
    pub fn require_username(self) -> Result<String, GatewayError> {
        self.username
            .filter(|u| !u.is_empty())
            .ok_or(GatewayError::MissingParam("username"))
    }
}

/// `{"ok": bool}` body shared by the confirmation-style routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub jwt: String,
}

/// Password policy: at least [`MIN_PASSWORD_LEN`] characters with a
/// lower-case letter, an upper-case letter, a digit and a symbol.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let mut missing = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        missing.push("at least 8 characters");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        missing.push("a lower-case letter");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        missing.push("an upper-case letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        missing.push("a digit");
    }
    if !password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
        missing.push("a symbol");
    }

    if missing.is_empty() {
        return Ok(());
    }

    let mut error = ValidationError::new("password_strength");
    error.message = Some(Cow::Owned(format!("password needs {}", missing.join(", "))));
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register("alice", "a@example.com", "Secret123!").validate().is_ok());
    }

    #[test]
    fn test_registration_field_errors() {
        let errors = register("", "not-an-email", "Secret123!").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("password"));
    }

    #[test]
    fn test_weak_passwords_rejected() {
        for weak in ["", "short1!", "alllowercase1!", "ALLUPPERCASE1!", "NoDigitsHere!", "NoSymbols123"] {
            let errors = register("alice", "a@example.com", weak).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("password"), "accepted {weak:?}");
        }
    }

    #[test]
    fn test_password_error_names_missing_classes() {
        let err = validate_password_strength("abcdefgh").unwrap_err();
        let message = err.message.unwrap();
        assert!(message.contains("an upper-case letter"));
        assert!(message.contains("a digit"));
        assert!(message.contains("a symbol"));
        assert!(!message.contains("8 characters"));
    }

    #[test]
    fn test_confirm_requires_username_and_code() {
        let req = ConfirmUserRequest {
            username: "alice".into(),
            code: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }

    #[test]
    fn test_login_and_resend_require_fields() {
        assert!(LoginRequest::default().validate().is_err());
        assert!(ResendConfirmationRequest::default().validate().is_err());
        assert!(ResendConfirmationRequest { username: "alice".into() }.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let req: LoginRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.password, "");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_username_query() {
        assert_eq!(
            UsernameQuery { username: Some("alice".into()) }.require_username().unwrap(),
            "alice"
        );
        assert!(matches!(
            UsernameQuery { username: Some(String::new()) }.require_username(),
            Err(GatewayError::MissingParam("username"))
        ));
        assert!(UsernameQuery::default().require_username().is_err());
    }

    #[test]
    fn test_response_shapes() {
        assert_eq!(serde_json::to_string(&OkResponse { ok: false }).unwrap(), r#"{"ok":false}"#);
        assert_eq!(
            serde_json::to_string(&LoginResponse { jwt: "a.b.c".into() }).unwrap(),
            r#"{"jwt":"a.b.c"}"#
        );
    }
}
