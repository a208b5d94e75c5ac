//! API client

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    AttendanceHistoryEntry, AttendanceStatusResponse, AuthPayload, CheckAction, CheckRequest,
    Leave, LeaveCreate, LeaveView, LoginRequest, RegisterRequest, UserProfile,
};
use shared::response::{StatusEnvelope, SuccessEnvelope};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::hook::{DiscardTokenOn401, ResponseHook};
use crate::token::TokenStore;

/// HTTP client for the HRMS API
///
/// Cloning is cheap; clones share the token and the hook.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<ClientConfig>,
    tokens: TokenStore,
    hook: Arc<dyn ResponseHook>,
}

impl ApiClient {
    /// Client with the default [`DiscardTokenOn401`] hook
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::with_hook(config, Arc::new(DiscardTokenOn401))
    }

    pub fn with_hook(config: ClientConfig, hook: Arc<dyn ResponseHook>) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            tokens: TokenStore::new(config.token.clone()),
            config: Arc::new(config),
            hook,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    // ========== Transport ==========

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.config.url(path));
        match self.tokens.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send, run the hook, then decode or classify
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        self.hook.on_response(response.status(), &self.tokens).await;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            return Err(ClientError::from_status(status, error_message(&text)));
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    // ========== Auth API ==========

    /// Register a self-service account and keep its token
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<UserProfile> {
        let env: StatusEnvelope<AuthPayload> = self.post("/api/auth/register", request).await?;
        self.keep_token(env.body)
    }

    /// Log in and keep the token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<UserProfile> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let env: StatusEnvelope<AuthPayload> = self.post("/api/auth/login", &request).await?;
        self.keep_token(env.body)
    }

    /// Identity behind the stored token
    pub async fn validate(&self) -> ClientResult<UserProfile> {
        let env: StatusEnvelope<AuthPayload> = self.get("/api/auth/validate").await?;
        Ok(env.body.user)
    }

    /// Tokens are stateless; logging out only forgets ours
    pub fn logout(&self) {
        self.tokens.clear();
    }

    fn keep_token(&self, payload: AuthPayload) -> ClientResult<UserProfile> {
        let token = payload
            .token
            .ok_or_else(|| ClientError::InvalidResponse("Missing token".to_string()))?;
        self.tokens.set(token);
        Ok(payload.user)
    }

    // ========== Attendance API ==========

    /// Today's status label, e.g. "Not checked in" or "Checked Out"
    pub async fn attendance_status(&self) -> ClientResult<String> {
        let res: AttendanceStatusResponse = self.get("/api/attendance/status").await?;
        Ok(res.status)
    }

    pub async fn check(
        &self,
        action: CheckAction,
        notes: Option<String>,
    ) -> ClientResult<AttendanceStatusResponse> {
        let request = CheckRequest {
            action: Some(action.as_str().to_string()),
            notes,
        };
        self.post("/api/attendance/check", &request).await
    }

    pub async fn attendance_history(&self, days: Option<u64>) -> ClientResult<Vec<AttendanceHistoryEntry>> {
        let path = match days {
            Some(days) => format!("/api/attendance/history?days={days}"),
            None => "/api/attendance/history".to_string(),
        };
        let env: SuccessEnvelope<Vec<AttendanceHistoryEntry>> = self.get(&path).await?;
        data(env)
    }

    // ========== Leave API ==========

    pub async fn leaves(&self) -> ClientResult<Vec<LeaveView>> {
        data(self.get("/api/leaves").await?)
    }

    pub async fn request_leave(&self, request: &LeaveCreate) -> ClientResult<Leave> {
        data(self.post("/api/leaves", request).await?)
    }

    // ========== Service ==========

    /// `/api/health` body, undecoded
    pub async fn health(&self) -> ClientResult<Value> {
        self.get("/api/health").await
    }
}

fn data<T>(env: SuccessEnvelope<T>) -> ClientResult<T> {
    env.data
        .ok_or_else(|| ClientError::InvalidResponse("Missing data".to_string()))
}

/// `message` from either error envelope, else the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
