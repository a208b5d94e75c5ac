//! Client configuration

use std::time::Duration;

/// Configuration for [`crate::ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://localhost:5001`
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Token to start with, if one was persisted earlier
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an `/api/...` path
    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5001")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ClientConfig::new("http://localhost:5001/");
        assert_eq!(
            config.url("/api/auth/login"),
            "http://localhost:5001/api/auth/login"
        );
        assert_eq!(config.url("api/health"), "http://localhost:5001/api/health");
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::default()
            .with_token("abc")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
