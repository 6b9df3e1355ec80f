//! Route composition for the `/user` API.

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::response::method_not_allowed;
use crate::user::handlers;
use crate::user::UserState;

/// Path prefix all user routes are nested under.
pub const USER_PATH_PREFIX: &str = "/user";

/// The routes of the user API, relative to [`USER_PATH_PREFIX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRoute {
    Register,
    Confirm,
    ResendConfirmation,
    CheckUsernameTaken,
    Login,
}

impl UserRoute {
    pub const ALL: [UserRoute; 5] = [
        UserRoute::Register,
        UserRoute::Confirm,
        UserRoute::ResendConfirmation,
        UserRoute::CheckUsernameTaken,
        UserRoute::Login,
    ];

    pub fn path(self) -> &'static str {
        match self {
            UserRoute::Register => "/register",
            UserRoute::Confirm => "/confirm",
            UserRoute::ResendConfirmation => "/resend-confirmation",
            UserRoute::CheckUsernameTaken => "/check-username-taken",
            UserRoute::Login => "/login",
        }
    }

    /// The only method the route answers; anything else gets a 405.
    pub fn method(self) -> axum::http::Method {
        match self {
            UserRoute::CheckUsernameTaken => axum::http::Method::GET,
            _ => axum::http::Method::POST,
        }
    }
}

/// Build the user router. Every path carries the shared 405 fallback;
/// HEAD is refused explicitly since `get` would otherwise answer it.
pub fn user_routes(state: UserState) -> Router {
    Router::new()
        .route(
            UserRoute::Register.path(),
            post(handlers::register).fallback(method_not_allowed),
        )
        .route(
            UserRoute::Confirm.path(),
            post(handlers::confirm).fallback(method_not_allowed),
        )
        .route(
            UserRoute::ResendConfirmation.path(),
            post(handlers::resend_confirmation).fallback(method_not_allowed),
        )
        .route(
            UserRoute::CheckUsernameTaken.path(),
            get(handlers::check_username_taken)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            UserRoute::Login.path(),
            post(handlers::login).fallback(method_not_allowed),
        )
        .with_state(state)
}
