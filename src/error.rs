//! Gateway error taxonomy.
//!
//! Every failure of a route is one [`GatewayError`]. Each variant maps to
//! exactly one HTTP status and one short public message; the detailed
//! cause is only ever logged.

use axum::http::StatusCode;
use validator::ValidationErrors;

use crate::backend::{BackendError, ConnectError};

/// Substring the identity provider puts in errors for accounts that have
/// not completed email confirmation.
pub const UNCONFIRMED_ACCOUNT_MARKER: &str = "UserNotConfirmedException";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request body is not the expected JSON.
    #[error("failed to decode json body: {0}")]
    Decode(#[source] serde_json::Error),

    /// Decoded payload failed its validator.
    #[error("payload is not valid: {0}")]
    Validation(#[from] ValidationErrors),

    /// A required query parameter is absent or empty.
    #[error("required url param {0} missing")]
    MissingParam(&'static str),

    #[error(transparent)]
    Connection(#[from] ConnectError),

    /// The backend call failed; `message` is what the client sees.
    #[error("{message}: {source}")]
    Invocation {
        message: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("login rejected for unconfirmed account: {0}")]
    Unconfirmed(#[source] BackendError),

    #[error("login rejected: {0}")]
    InvalidCredentials(#[source] BackendError),

    #[error("failed to encode json: {0}")]
    Encode(#[source] serde_json::Error),
}

impl GatewayError {
    pub fn invocation(message: &'static str, source: BackendError) -> Self {
        GatewayError::Invocation { message, source }
    }

    /// Classify a failed login. Only the unconfirmed-account case is told
    /// apart; wrong username and wrong password look the same.
    pub fn login_failure(source: BackendError) -> Self {
        if source.to_string().contains(UNCONFIRMED_ACCOUNT_MARKER) {
            GatewayError::Unconfirmed(source)
        } else {
            GatewayError::InvalidCredentials(source)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::MissingParam(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unconfirmed(_) => StatusCode::FORBIDDEN,
            GatewayError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
            GatewayError::Decode(_)
            | GatewayError::Connection(_)
            | GatewayError::Invocation { .. }
            | GatewayError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Decode(_) => "Failed to decode json body".to_string(),
            GatewayError::Validation(errors) => format!("Payload is not valid: {}", errors),
            GatewayError::MissingParam(name) => format!("Required url param {} missing", name),
            GatewayError::Connection(_) => "Failed to connect to service".to_string(),
            GatewayError::Invocation { message, .. } => (*message).to_string(),
            GatewayError::Unconfirmed(_) => "User is not confirmed".to_string(),
            GatewayError::InvalidCredentials(_) => "Username or password is incorrect".to_string(),
            GatewayError::Encode(_) => "Failed to encode json".to_string(),
        }
    }
}
