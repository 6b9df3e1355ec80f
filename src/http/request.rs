//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) when the client sent none
//! - Decode JSON bodies into route DTOs
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Bodies are decoded from raw bytes: no content-type requirement,
//!   unknown fields ignored, decode failures reported through the
//!   gateway's own error mapping

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::http::response::Outcome;

/// Header carrying the request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 for requests arriving without `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Read the request id set by the request-id layer, if any.
pub fn request_id<B>(request: &axum::http::Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// JSON body extractor whose decode failures go through [`GatewayError`].
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Body-limit and transport rejections keep their own status.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| Outcome::<()>::from(Err(GatewayError::Decode(e))).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Payload {
        username: String,
    }

    fn request(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_decodes_without_content_type() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(request(r#"{"username":"alice","extra":1}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_empty() {
        let JsonBody(payload) = JsonBody::<Payload>::from_request(request("{}"), &()).await.unwrap();
        assert!(payload.username.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_server_error() {
        let rejection = JsonBody::<Payload>::from_request(request("{not json"), &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let req = axum::http::Request::new(());
        let mut maker = MakeRequestUuid;
        let a = maker.make_request_id(&req).unwrap();
        let b = maker.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
