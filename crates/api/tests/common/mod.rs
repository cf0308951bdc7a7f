#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use ideahub_api::auth::jwt::{generate_access_token, JwtConfig};
use ideahub_api::config::ServerConfig;
use ideahub_api::router::build_app_router;
use ideahub_api::state::AppState;
use ideahub_core::roles::Role;
use ideahub_core::types::DbId;
use ideahub_db::models::user::CreateUser;
use ideahub_events::NotificationSink;
use ideahub_workflow::memory::MemoryBackend;
use ideahub_workflow::ports::UserDirectory;
use ideahub_workflow::Backend;
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A seeded user and a valid token for them.
pub struct TestUser {
    pub id: DbId,
    pub token: String,
}

/// The full router over fresh in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub memory: MemoryBackend,
    config: ServerConfig,
}

impl TestApp {
    pub fn new() -> Self {
        let memory = MemoryBackend::new();
        let backend = memory.backend();
        Self::build(memory, backend)
    }

    /// Same stores, but notices go to `sink` instead of the inbox.
    pub fn with_sink(sink: Arc<dyn NotificationSink>) -> Self {
        let memory = MemoryBackend::new();
        let mut backend = memory.backend();
        backend.sink = sink;
        Self::build(memory, backend)
    }

    fn build(memory: MemoryBackend, backend: Backend) -> Self {
        let config = test_config();
        let router = build_app_router(AppState::new(config.clone(), &backend));
        Self {
            router,
            memory,
            config,
        }
    }

    /// Insert a user directly and mint a token, skipping the password hash.
    pub async fn user(&self, name: &str, role: Role) -> TestUser {
        let user = self
            .memory
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password_hash: "unused".to_string(),
                role,
            })
            .await
            .expect("seed user");
        let token = generate_access_token(user.id, role, &self.config.jwt).expect("token");
        TestUser { id: user.id, token }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user: &TestUser) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(&user.token), None).await
    }

    pub async fn post(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(&user.token), Some(body))
            .await
    }

    pub async fn put(&self, uri: &str, user: &TestUser, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(&user.token), Some(body))
            .await
    }
}
