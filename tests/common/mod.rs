//! Shared utilities for integration testing.
//!
//! [`FakeConnector`] stands in for the user service: it hands out scripted
//! [`FakeBackend`]s and counts every connection and call.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use user_gateway::backend::{
    BackendConnection, BackendConnector, BackendError, ConnectError, UserBackend,
};
use user_gateway::config::GatewayConfig;
use user_gateway::resilience::Deadline;
use user_gateway::GatewayServer;

/// Backend operations, as recorded by [`Counters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    CreateUser,
    ConfirmUser,
    UsernameTaken,
    ResendConfirmation,
    Login,
}

/// How the fake user service behaves for one test.
#[derive(Debug, Clone)]
pub struct Script {
    pub taken: bool,
    pub jwt: String,
    /// The operation that fails, and with what.
    pub failing: Option<(Op, BackendError)>,
    /// Every call blocks forever.
    pub hang: bool,
    /// Acquisition fails.
    pub unreachable: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            taken: true,
            jwt: "header.payload.signature".to_string(),
            failing: None,
            hang: false,
            unreachable: false,
        }
    }
}

impl Script {
    pub fn failing(op: Op, message: &str) -> Self {
        Self {
            failing: Some((
                op,
                BackendError::Rejected {
                    code: tonic::Code::Unknown,
                    message: message.to_string(),
                },
            )),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct Counters {
    opened: AtomicUsize,
    closed: AtomicUsize,
    calls: Mutex<Vec<Op>>,
}

impl Counters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls().iter().filter(|c| **c == op).count()
    }
}

pub struct FakeConnector {
    script: Script,
    counters: Arc<Counters>,
}

impl FakeConnector {
    pub fn new(script: Script) -> (Self, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let connector = Self {
            script,
            counters: counters.clone(),
        };
        (connector, counters)
    }
}

#[async_trait]
impl BackendConnector for FakeConnector {
    async fn acquire(&self) -> Result<BackendConnection, ConnectError> {
        if self.script.unreachable {
            return Err(ConnectError::InvalidEndpoint {
                target: "fake:0".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let backend = FakeBackend {
            script: self.script.clone(),
            counters: self.counters.clone(),
        };
        Ok(BackendConnection::open(Box::new(backend), Arc::from("fake:0")))
    }
}

pub struct FakeBackend {
    script: Script,
    counters: Arc<Counters>,
}

impl FakeBackend {
    async fn call(&self, op: Op) -> Result<(), BackendError> {
        self.counters.calls.lock().unwrap().push(op);
        if self.script.hang {
            std::future::pending::<()>().await;
        }
        match &self.script.failing {
            Some((failing, err)) if *failing == op => Err(err.clone()),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl UserBackend for FakeBackend {
    async fn create_user(
        &mut self,
        _deadline: Deadline,
        _username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<(), BackendError> {
        self.call(Op::CreateUser).await
    }

    async fn confirm_user(
        &mut self,
        _deadline: Deadline,
        _username: &str,
        _code: &str,
    ) -> Result<(), BackendError> {
        self.call(Op::ConfirmUser).await
    }

    async fn username_taken(&mut self, _deadline: Deadline, _username: &str) -> Result<bool, BackendError> {
        self.call(Op::UsernameTaken).await?;
        Ok(self.script.taken)
    }

    async fn resend_confirmation(&mut self, _deadline: Deadline, _username: &str) -> Result<(), BackendError> {
        self.call(Op::ResendConfirmation).await
    }

    async fn login(
        &mut self,
        _deadline: Deadline,
        _username: &str,
        _password: &str,
    ) -> Result<String, BackendError> {
        self.call(Op::Login).await?;
        Ok(self.script.jwt.clone())
    }

    fn close(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Config with a short backend deadline.
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.timeouts.rpc_ms = 200;
    config
}

/// Full gateway router backed by a scripted fake.
pub fn gateway(script: Script) -> (Router, Arc<Counters>) {
    let (connector, counters) = FakeConnector::new(script);
    let server = GatewayServer::new(test_config(), Arc::new(connector));
    (server.router(), counters)
}

pub fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
