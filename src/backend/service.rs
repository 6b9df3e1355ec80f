//! The user service as seen by the gateway.
//!
//! [`UserBackend`] is the seam between route translators and the RPC
//! transport. [`GrpcUserBackend`] is the production implementation; tests
//! substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use tonic::{Code, Request, Status};

use crate::backend::client::UserServiceClient;
use crate::backend::proto;
use crate::resilience::Deadline;

/// Failure of a single backend call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// The service answered with a non-OK status.
    #[error("backend returned {code:?}: {message}")]
    Rejected { code: Code, message: String },

    #[error("backend call exceeded its {0:?} deadline")]
    DeadlineExceeded(Duration),

    /// The call was made on a connection that was already released.
    #[error("backend connection is closed")]
    Closed,
}

impl From<Status> for BackendError {
    fn from(status: Status) -> Self {
        BackendError::Rejected {
            code: status.code(),
            message: status.message().to_string(),
        }
    }
}

/// Operations of the remote user service.
///
/// Every call takes the request's [`Deadline`]. Callers enforce it locally;
/// implementations also forward it to the wire where the transport allows.
#[async_trait]
pub trait UserBackend: Send {
    async fn create_user(
        &mut self,
        deadline: Deadline,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), BackendError>;

    async fn confirm_user(
        &mut self,
        deadline: Deadline,
        username: &str,
        code: &str,
    ) -> Result<(), BackendError>;

    async fn username_taken(&mut self, deadline: Deadline, username: &str) -> Result<bool, BackendError>;

    async fn resend_confirmation(&mut self, deadline: Deadline, username: &str) -> Result<(), BackendError>;

    /// Returns the issued JWT.
    async fn login(
        &mut self,
        deadline: Deadline,
        username: &str,
        password: &str,
    ) -> Result<String, BackendError>;

    /// Release the underlying connection. Called exactly once, by
    /// [`BackendConnection`](crate::backend::BackendConnection) on drop.
    fn close(&mut self);
}

/// [`UserBackend`] over a dedicated gRPC channel.
#[derive(Debug)]
pub struct GrpcUserBackend {
    client: Option<UserServiceClient>,
}

impl GrpcUserBackend {
    pub fn new(client: UserServiceClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    fn client(&mut self) -> Result<&mut UserServiceClient, BackendError> {
        self.client.as_mut().ok_or(BackendError::Closed)
    }
}

/// Wrap a message, stamping the remaining budget as `grpc-timeout`.
fn request_with_deadline<T>(message: T, deadline: Deadline) -> Request<T> {
    let mut request = Request::new(message);
    request.set_timeout(deadline.remaining());
    request
}

#[async_trait]
impl UserBackend for GrpcUserBackend {
    async fn create_user(
        &mut self,
        deadline: Deadline,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), BackendError> {
        let request = request_with_deadline(
            proto::CreateUserRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
            deadline,
        );
        let client = self.client()?;
        client.create_user(request).await?;
        Ok(())
    }

    async fn confirm_user(
        &mut self,
        deadline: Deadline,
        username: &str,
        code: &str,
    ) -> Result<(), BackendError> {
        let request = request_with_deadline(
            proto::ConfirmUserRequest {
                username: username.to_string(),
                code: code.to_string(),
            },
            deadline,
        );
        let client = self.client()?;
        client.confirm_user(request).await?;
        Ok(())
    }

    async fn username_taken(&mut self, deadline: Deadline, username: &str) -> Result<bool, BackendError> {
        let request = request_with_deadline(
            proto::UsernameTakenRequest {
                username: username.to_string(),
            },
            deadline,
        );
        let client = self.client()?;
        let reply = client.username_taken(request).await?;
        Ok(reply.into_inner().taken)
    }

    async fn resend_confirmation(&mut self, deadline: Deadline, username: &str) -> Result<(), BackendError> {
        let request = request_with_deadline(
            proto::ResendConfirmationRequest {
                username: username.to_string(),
            },
            deadline,
        );
        let client = self.client()?;
        client.resend_confirmation(request).await?;
        Ok(())
    }

    async fn login(
        &mut self,
        deadline: Deadline,
        username: &str,
        password: &str,
    ) -> Result<String, BackendError> {
        let request = request_with_deadline(
            proto::LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            },
            deadline,
        );
        let client = self.client()?;
        let reply = client.login(request).await?;
        Ok(reply.into_inner().jwt)
    }

    fn close(&mut self) {
        // Dropping the last client handle closes the channel.
        self.client = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keeps_code_and_message() {
        let err = BackendError::from(Status::failed_precondition(
            "UserNotConfirmedException: User is not confirmed.",
        ));
        match &err {
            BackendError::Rejected { code, message } => {
                assert_eq!(*code, Code::FailedPrecondition);
                assert!(message.starts_with("UserNotConfirmedException"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().contains("UserNotConfirmedException"));
    }
}
