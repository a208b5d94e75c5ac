//! Router harness over the in-memory store

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use hrms_server::auth::password::hash_password;
use hrms_server::db::{MemoryStore, NewUser, Store, seed};
use hrms_server::{AppState, Config, api};
use shared::models::Role;

pub const PASSWORD: &str = "secret123";

/// bcrypt's minimum cost keeps directly seeded accounts fast to create
const TEST_COST: u32 = 4;

#[derive(Clone)]
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Config::from_lookup(|_| None).expect("development defaults");
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        seed::run(store.as_ref(), &config).await.expect("seed");
        let state = AppState::with_store(config, store);
        Self {
            app: api::build_app(state.clone()),
            state,
        }
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
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.app.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Register through the API; returns `(user_id, token)`
    pub async fn register(&self, email: &str) -> (i64, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "first_name": "Test",
                    "last_name": "Employee",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let id = body["user"]["id"].as_i64().expect("user id");
        let token = body["token"].as_str().expect("token").to_string();
        (id, token)
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Insert an account with the given role straight into the store and log in
    pub async fn account(&self, email: &str, role: Role) -> (i64, String) {
        let user = self
            .state
            .store
            .create_user(NewUser {
                email: email.into(),
                password_hash: hash_password(PASSWORD, TEST_COST).await.expect("hash"),
                first_name: "Seeded".into(),
                last_name: role.as_str().into(),
                role,
                department_id: None,
                position: None,
                salary: None,
                phone: None,
            })
            .await
            .expect("create user");
        let (status, body) = self.login(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (user.id, body["token"].as_str().expect("token").to_string())
    }

    pub async fn admin(&self) -> (i64, String) {
        self.account("admin@example.com", Role::Admin).await
    }
}
