//! Wire messages of the `user.User` gRPC service.
//!
//! Mirrors `proto/user.proto`; kept as hand-written `prost` derives so the
//! build does not need `protoc`.

/// Fully-qualified gRPC method paths.
pub mod paths {
    pub const CREATE_USER: &str = "/user.User/CreateUser";
    pub const CONFIRM_USER: &str = "/user.User/ConfirmUser";
    pub const USERNAME_TAKEN: &str = "/user.User/UsernameTaken";
    pub const RESEND_CONFIRMATION: &str = "/user.User/ResendConfirmation";
    pub const LOGIN: &str = "/user.User/Login";
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateUserRequest {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateUserReply {
    /// Identifier assigned by the identity provider.
    #[prost(string, tag = "1")]
    pub user_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ConfirmUserRequest {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, tag = "2")]
    pub code: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ConfirmUserReply {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UsernameTakenRequest {
    #[prost(string, tag = "1")]
    pub username: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct UsernameTakenReply {
    #[prost(bool, tag = "1")]
    pub taken: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ResendConfirmationRequest {
    #[prost(string, tag = "1")]
    pub username: String,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ResendConfirmationReply {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LoginRequest {
    #[prost(string, tag = "1")]
    pub username: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LoginReply {
    #[prost(string, tag = "1")]
    pub jwt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_login_reply_wire_format() {
        // field 1, wire type 2 (length-delimited), length 3, "a.b"
        let reply = LoginReply::decode(&[0x0a, 0x03, b'a', b'.', b'b'][..]).unwrap();
        assert_eq!(reply.jwt, "a.b");
    }

    #[test]
    fn test_empty_reply_decodes_to_default() {
        let reply = UsernameTakenReply::decode(&[][..]).unwrap();
        assert!(!reply.taken);
    }
}
