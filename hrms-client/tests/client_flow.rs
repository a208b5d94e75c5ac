//! Client against a live server on an ephemeral port

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hrms_client::{
    ApiClient, CheckAction, ClientConfig, ClientError, LeaveCreate, RegisterRequest, ResponseHook,
    TokenStore,
};
use hrms_server::db::{MemoryStore, Store, UserStore, seed};
use hrms_server::{AppState, Config, api};
use reqwest::StatusCode;
use shared::models::Role;
use tokio::net::TcpListener;

/// Serve the full app over the in-memory store; returns its base URL
async fn spawn_server() -> (String, AppState) {
    let config = Config::from_lookup(|_| None).expect("development defaults");
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    seed::run(store.as_ref(), &config).await.expect("seed");
    let state = AppState::with_store(config, store);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = api::build_app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{addr}"), state)
}

fn registration(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "secret123".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        department: Some("engineering".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_register_login_and_attendance() {
    let (base_url, _state) = spawn_server().await;
    let client = ApiClient::new(ClientConfig::new(base_url)).expect("client");

    let user = client.register(&registration("ada@example.com")).await.expect("register");
    assert_eq!(user.role, Role::Employee);
    assert!(client.tokens().is_set());

    client.logout();
    assert!(client.token().is_none());
    let again = client.login("ADA@example.com", "secret123").await.expect("login");
    assert_eq!(again.id, user.id);
    assert_eq!(client.validate().await.expect("validate").email, "ada@example.com");

    assert_eq!(client.attendance_status().await.expect("status"), "Not checked in");
    let res = client.check(CheckAction::Checkin, None).await.expect("check in");
    assert_eq!(res.message.as_deref(), Some("Successfully checked in"));

    // Business-rule rejections are 400 and leave the token alone
    let err = client.check(CheckAction::Checkin, None).await.unwrap_err();
    assert!(matches!(&err, ClientError::Validation(m) if m == "Already checked in today"));
    assert!(client.tokens().is_set());

    client.check(CheckAction::Checkout, Some("done".into())).await.expect("check out");
    assert_eq!(client.attendance_status().await.expect("status"), "Checked Out");
    let history = client.attendance_history(Some(1)).await.expect("history");
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn test_leave_requests_through_client() {
    let (base_url, _state) = spawn_server().await;
    let client = ApiClient::new(ClientConfig::new(base_url)).expect("client");
    client.register(&registration("leave@example.com")).await.expect("register");

    let today = chrono::Local::now().date_naive();
    let leave = client
        .request_leave(&LeaveCreate {
            leave_type: Some("vacation".into()),
            start_date: Some(today.to_string()),
            end_date: Some((today + chrono::Days::new(2)).to_string()),
            reason: None,
        })
        .await
        .expect("request leave");
    let listed = client.leaves().await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].leave.id, leave.id);

    let err = client.request_leave(&LeaveCreate::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_unauthorized_response_discards_token() {
    let (base_url, state) = spawn_server().await;
    let client = ApiClient::new(ClientConfig::new(base_url)).expect("client");
    let user = client.register(&registration("gone@example.com")).await.expect("register");

    state.store.set_active(user.id, false).await.expect("deactivate");

    let err = client.validate().await.unwrap_err();
    assert!(matches!(&err, ClientError::Unauthorized(m) if m == "User not found or inactive"));
    assert!(client.token().is_none());

    // Without a token the guard answers 401 again; nothing left to clear
    let err = client.attendance_status().await.unwrap_err();
    assert!(matches!(&err, ClientError::Unauthorized(m) if m == "Access token required"));
}

#[tokio::test]
async fn test_stale_configured_token_is_dropped() {
    let (base_url, _state) = spawn_server().await;
    let client = ApiClient::new(ClientConfig::new(base_url).with_token("not-a-jwt")).expect("client");
    assert!(client.tokens().is_set());

    let err = client.validate().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!client.tokens().is_set());
}

struct CountingHook(AtomicUsize);

#[async_trait]
impl ResponseHook for CountingHook {
    async fn on_response(&self, _status: StatusCode, _tokens: &TokenStore) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_custom_hook_sees_every_response() {
    let (base_url, _state) = spawn_server().await;
    let hook = Arc::new(CountingHook(AtomicUsize::new(0)));
    let client = ApiClient::with_hook(
        ClientConfig::new(base_url).with_token("not-a-jwt"),
        hook.clone(),
    )
    .expect("client");

    let health = client.health().await.expect("health");
    assert_eq!(health["status"], "healthy");
    assert!(client.validate().await.is_err());

    assert_eq!(hook.0.load(Ordering::SeqCst), 2);
    // A replacement hook owns the 401 policy; the token stays
    assert!(client.tokens().is_set());
}
