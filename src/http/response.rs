//! Response encoding.
//!
//! # Responsibilities
//! - Turn a translator's result into exactly one [`Outcome`]
//! - Log the cause of every failure once, at the translator boundary
//! - Encode success as JSON and failure as plain text
//!
//! # Design Decisions
//! - Success bodies are `application/json`; error bodies are a single
//!   plain-text line. Clients rely on this asymmetry, so it is kept.
//! - A success body that fails to serialize becomes a 500

use axum::{
    body::Bytes,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::GatewayError;

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Final result of one route, prior to encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Failure { status: StatusCode, message: String },
}

impl<T> From<Result<T, GatewayError>> for Outcome<T> {
    fn from(result: Result<T, GatewayError>) -> Self {
        match result {
            Ok(body) => Outcome::Success(body),
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), error = %err, "Request failed");
                } else {
                    tracing::warn!(status = status.as_u16(), error = %err, "Request rejected");
                }
                Outcome::Failure {
                    status,
                    message: err.public_message(),
                }
            }
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Encode into status, content type and body bytes.
    pub fn encode(self) -> (StatusCode, &'static str, Bytes) {
        match self {
            Outcome::Success(body) => match serde_json::to_vec(&body) {
                Ok(bytes) => (StatusCode::OK, APPLICATION_JSON, Bytes::from(bytes)),
                Err(e) => Outcome::<()>::from(Err(GatewayError::Encode(e))).encode(),
            },
            Outcome::Failure { status, message } => (status, TEXT_PLAIN, Bytes::from(message)),
        }
    }
}

impl<T: Serialize> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        let (status, content_type, body) = self.encode();
        (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(content_type))],
            body,
        )
            .into_response()
    }
}

/// Shared fallback for a known path hit with the wrong method.
pub async fn method_not_allowed(method: Method) -> Response {
    tracing::warn!(method = %method, "Method not allowed");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{} method not allowed", method),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::ser::Error as _;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Flag {
        ok: bool,
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_success_is_json() {
        let (status, content_type, body) = Outcome::Success(Flag { ok: true }).encode();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, APPLICATION_JSON);
        assert_eq!(&body[..], br#"{"ok":true}"#);
    }

    #[test]
    fn test_failure_is_plain_text() {
        let outcome: Outcome<HashMap<String, String>> =
            Outcome::from(Err(GatewayError::MissingParam("username")));
        let (status, content_type, body) = outcome.encode();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, TEXT_PLAIN);
        assert_eq!(&body[..], b"Required url param username missing");
    }

    #[test]
    fn test_encode_failure_is_server_error() {
        let (status, content_type, body) = Outcome::Success(Unserializable).encode();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type, TEXT_PLAIN);
        assert_eq!(&body[..], b"Failed to encode json");
    }

    #[tokio::test]
    async fn test_method_not_allowed_names_method() {
        let response = method_not_allowed(Method::DELETE).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
