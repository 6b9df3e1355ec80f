//! Async client for the user gateway's `/user` API.

pub mod client;

pub use client::{
    ConfirmRequest, GatewayClient, LoginRequest, LoginResponse, OkResponse, RegisterRequest,
    SdkError,
};
