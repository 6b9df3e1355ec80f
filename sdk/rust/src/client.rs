use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The gateway answered with a non-2xx status; `message` is its
    /// plain-text body.
    #[error("gateway returned {status}: {message}")]
    Status { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub username: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub jwt: String,
}

#[derive(Serialize)]
struct UsernameBody<'a> {
    username: &'a str,
}

pub struct GatewayClient {
    client: Client,
    gateway_url: String,
}

impl GatewayClient {
    pub fn new(gateway_url: &str) -> Self {
        Self {
            client: Client::new(),
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/user/{}", self.gateway_url, route)
    }

    /// Create an account; `ok` is true once the user service accepted it.
    pub async fn register(&self, req: &RegisterRequest) -> Result<OkResponse, SdkError> {
        let resp = self.client.post(self.url("register")).json(req).send().await?;
        decode(resp).await
    }

    /// Confirm an account with the code the user received.
    pub async fn confirm(&self, req: &ConfirmRequest) -> Result<OkResponse, SdkError> {
        let resp = self.client.post(self.url("confirm")).json(req).send().await?;
        decode(resp).await
    }

    /// Ask for a new confirmation code. `ok` is false for unknown usernames.
    pub async fn resend_confirmation(&self, username: &str) -> Result<OkResponse, SdkError> {
        let resp = self
            .client
            .post(self.url("resend-confirmation"))
            .json(&UsernameBody { username })
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn check_username_taken(&self, username: &str) -> Result<OkResponse, SdkError> {
        let resp = self
            .client
            .get(self.url("check-username-taken"))
            .query(&[("username", username)])
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, SdkError> {
        let resp = self.client.post(self.url("login")).json(req).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        return Err(SdkError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp.json().await?)
}
