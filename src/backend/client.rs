//! gRPC client for the user service.

use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{client::Grpc, Request, Response, Status};

use crate::backend::proto::{self, paths};

/// Unary client over one `tonic` channel.
#[derive(Debug, Clone)]
pub struct UserServiceClient {
    inner: Grpc<Channel>,
}

impl UserServiceClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: Grpc::new(channel),
        }
    }

    pub async fn create_user(
        &mut self,
        request: Request<proto::CreateUserRequest>,
    ) -> Result<Response<proto::CreateUserReply>, Status> {
        self.unary(request, paths::CREATE_USER).await
    }

    pub async fn confirm_user(
        &mut self,
        request: Request<proto::ConfirmUserRequest>,
    ) -> Result<Response<proto::ConfirmUserReply>, Status> {
        self.unary(request, paths::CONFIRM_USER).await
    }

    pub async fn username_taken(
        &mut self,
        request: Request<proto::UsernameTakenRequest>,
    ) -> Result<Response<proto::UsernameTakenReply>, Status> {
        self.unary(request, paths::USERNAME_TAKEN).await
    }

    pub async fn resend_confirmation(
        &mut self,
        request: Request<proto::ResendConfirmationRequest>,
    ) -> Result<Response<proto::ResendConfirmationReply>, Status> {
        self.unary(request, paths::RESEND_CONFIRMATION).await
    }

    pub async fn login(
        &mut self,
        request: Request<proto::LoginRequest>,
    ) -> Result<Response<proto::LoginReply>, Status> {
        self.unary(request, paths::LOGIN).await
    }

    async fn unary<Req, Rep>(
        &mut self,
        request: Request<Req>,
        method: &'static str,
    ) -> Result<Response<Rep>, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Rep: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {}", e)))?;
        let codec: ProstCodec<Req, Rep> = ProstCodec::default();
        self.inner
            .unary(request, PathAndQuery::from_static(method), codec)
            .await
    }
}
