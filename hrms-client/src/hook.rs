//! Response interception
//!
//! A [`ResponseHook`] sees the status of every response before the body is
//! decoded. It is installed once per [`crate::ApiClient`].

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::token::TokenStore;

#[async_trait]
pub trait ResponseHook: Send + Sync {
    async fn on_response(&self, status: StatusCode, tokens: &TokenStore);
}

/// Discards the stored token on any 401
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardTokenOn401;

#[async_trait]
impl ResponseHook for DiscardTokenOn401 {
    async fn on_response(&self, status: StatusCode, tokens: &TokenStore) {
        if status == StatusCode::UNAUTHORIZED && tokens.clear() {
            tracing::info!("Received 401, discarded stored token");
        }
    }
}
