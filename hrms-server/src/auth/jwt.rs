//! Identity token service
//!
//! HS256 tokens carrying `{userId, email, iat, exp}`. Tokens are not stored;
//! a token is only as good as its signature, its expiry and the user it names.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims stored in the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed token or wrong algorithm
    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token expired")]
    Expired,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Issues and verifies identity tokens with one process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, expires_in: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        }
    }

    pub fn expires_in(&self) -> Duration {
        self.expires_in
    }

    /// Sign a token for `user_id`, valid from now for the configured window
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        let iat = Utc::now().timestamp();
        let ttl = i64::try_from(self.expires_in.as_secs()).unwrap_or(i64::MAX);
        self.sign(&Claims {
            user_id,
            email: email.to_string(),
            iat,
            exp: iat.saturating_add(ttl),
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::GenerationFailed(e.to_string()))
    }

    /// Verify signature and expiry (zero leeway) and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;
        Ok(data.claims)
    }

    /// `Bearer <token>` → `<token>`
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(secret, Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service("secret-a");
        let token = tokens.issue(42, "ana@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_use_user_id_key() {
        let json = serde_json::to_value(Claims {
            user_id: 7,
            email: "x@y.z".into(),
            iat: 1,
            exp: 2,
        })
        .unwrap();
        assert_eq!(json["userId"], 7);
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = service("secret-a").issue(1, "a@b.co").unwrap();
        assert!(matches!(
            service("secret-b").verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service("secret-a");
        let now = Utc::now().timestamp();
        let token = tokens
            .sign(&Claims {
                user_id: 1,
                email: "a@b.co".into(),
                iat: now - 120,
                exp: now - 1,
            })
            .unwrap();
        assert_eq!(tokens.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            service("s").verify("not.a.token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_other_algorithm_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            email: "a@b.co".into(),
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"s"),
        )
        .unwrap();
        assert!(matches!(service("s").verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(TokenService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(TokenService::extract_from_header("Basic abc"), None);
        assert_eq!(TokenService::extract_from_header("Bearer "), None);
        assert_eq!(TokenService::extract_from_header("abc"), None);
    }
}
