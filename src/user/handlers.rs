//! Route translators for the `/user` API.
//!
//! Each handler runs the same pipeline and stops at the first failure:
//!
//! ```text
//! decode (JsonBody) → validate → acquire connection → invoke → encode
//!                                       └── connection dropped on every exit
//! ```
//!
//! Validation always happens before a connection is acquired.

use axum::extract::{Query, State};
use validator::Validate;

use crate::error::GatewayError;
use crate::http::request::JsonBody;
use crate::http::response::Outcome;
use crate::resilience::with_deadline;
use crate::user::dto::{
    ConfirmUserRequest, LoginRequest, LoginResponse, OkResponse, RegisterRequest,
    ResendConfirmationRequest, UsernameQuery,
};
use crate::user::UserState;

/// `POST /user/register`
#[tracing::instrument(name = "register", skip_all)]
pub async fn register(
    State(state): State<UserState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Outcome<OkResponse> {
    Outcome::from(register_user(&state, request).await)
}

async fn register_user(state: &UserState, request: RegisterRequest) -> Result<OkResponse, GatewayError> {
    request.validate()?;

    let mut backend = state.connect().await?;
    let deadline = state.deadline();
    with_deadline(
        deadline,
        backend.create_user(deadline, &request.username, &request.email, &request.password),
    )
    .await
    .map_err(|e| GatewayError::invocation("Failed to register user", e))?;

    tracing::info!(username = %request.username, "User registered");
    Ok(OkResponse { ok: true })
}

/// `POST /user/confirm`
#[tracing::instrument(name = "confirm", skip_all)]
pub async fn confirm(
    State(state): State<UserState>,
    JsonBody(request): JsonBody<ConfirmUserRequest>,
) -> Outcome<OkResponse> {
    Outcome::from(confirm_user(&state, request).await)
}

async fn confirm_user(state: &UserState, request: ConfirmUserRequest) -> Result<OkResponse, GatewayError> {
    request.validate()?;

    let mut backend = state.connect().await?;
    let deadline = state.deadline();
    with_deadline(
        deadline,
        backend.confirm_user(deadline, &request.username, &request.code),
    )
    .await
    .map_err(|e| GatewayError::invocation("Failed to confirm user", e))?;

    Ok(OkResponse { ok: true })
}

/// `POST /user/resend-confirmation`
///
/// Resends only for existing usernames and answers `{"ok": <exists>}`, so
/// an unknown username gets `{"ok": false}` rather than an error.
#[tracing::instrument(name = "resend_confirmation", skip_all)]
pub async fn resend_confirmation(
    State(state): State<UserState>,
    JsonBody(request): JsonBody<ResendConfirmationRequest>,
) -> Outcome<OkResponse> {
    Outcome::from(resend(&state, request).await)
}

async fn resend(state: &UserState, request: ResendConfirmationRequest) -> Result<OkResponse, GatewayError> {
    request.validate()?;

    let mut backend = state.connect().await?;
    let deadline = state.deadline();
    let taken = with_deadline(deadline, backend.username_taken(deadline, &request.username))
        .await
        .map_err(|e| GatewayError::invocation("Failed to check if username exists", e))?;

    if taken {
        with_deadline(deadline, backend.resend_confirmation(deadline, &request.username))
            .await
            .map_err(|e| GatewayError::invocation("Failed to resend confirmation", e))?;
    } else {
        tracing::debug!("Username unknown, nothing to resend");
    }

    Ok(OkResponse { ok: taken })
}

/// `GET /user/check-username-taken?username=…`
#[tracing::instrument(name = "check_username_taken", skip_all)]
pub async fn check_username_taken(
    State(state): State<UserState>,
    Query(query): Query<UsernameQuery>,
) -> Outcome<OkResponse> {
    Outcome::from(username_taken(&state, query).await)
}

async fn username_taken(state: &UserState, query: UsernameQuery) -> Result<OkResponse, GatewayError> {
    let username = query.require_username()?;

    let mut backend = state.connect().await?;
    let deadline = state.deadline();
    let taken = with_deadline(deadline, backend.username_taken(deadline, &username))
        .await
        .map_err(|e| GatewayError::invocation("Failed to check if username exists", e))?;

    Ok(OkResponse { ok: taken })
}

/// `POST /user/login`
#[tracing::instrument(name = "login", skip_all)]
pub async fn login(
    State(state): State<UserState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Outcome<LoginResponse> {
    Outcome::from(login_user(&state, request).await)
}

async fn login_user(state: &UserState, request: LoginRequest) -> Result<LoginResponse, GatewayError> {
    request.validate()?;

    let mut backend = state.connect().await?;
    let deadline = state.deadline();
    let jwt = with_deadline(
        deadline,
        backend.login(deadline, &request.username, &request.password),
    )
    .await
    .map_err(GatewayError::login_failure)?;

    Ok(LoginResponse { jwt })
}
