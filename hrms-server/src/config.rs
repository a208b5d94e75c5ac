//! Server configuration

use std::time::Duration;

use crate::BoxError;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_JWT_EXPIRE: &str = "24h";

/// Server configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 signing secret; rotating it invalidates every outstanding token
    pub jwt_secret: String,
    pub jwt_expire: Duration,
    /// Allowed CORS origin
    pub client_url: Option<String>,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    /// Seed default departments (and the bootstrap admin) on startup
    pub seed_data: bool,
    /// Bootstrap admin account created by seeding when both are set
    pub seed_admin_email: Option<String>,
    pub seed_admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("NODE_ENV"))
            .unwrap_or_else(|| "development".into());
        let is_development = environment == "development";

        let database_url = var("DATABASE_URL").or_else(|| {
            var("DB_HOST").map(|host| {
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    var("DB_USER").unwrap_or_else(|| "postgres".into()),
                    var("DB_PASSWORD").unwrap_or_default(),
                    host,
                    var("DB_PORT").unwrap_or_else(|| "5432".into()),
                    var("DB_NAME").unwrap_or_else(|| "hrms_db".into()),
                )
            })
        });
        if database_url.is_none() && !is_development {
            return Err(
                format!("DATABASE_URL or DB_HOST must be set in {environment} environment").into(),
            );
        }

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if is_development => "dev-JWT_SECRET-not-for-production".into(),
            None => return Err(format!("JWT_SECRET must be set in {environment} environment").into()),
        };

        let jwt_expire_raw = var("JWT_EXPIRE").unwrap_or_else(|| DEFAULT_JWT_EXPIRE.into());
        let jwt_expire = humantime::parse_duration(&jwt_expire_raw)
            .map_err(|e| format!("JWT_EXPIRE {jwt_expire_raw:?} is not a duration: {e}"))?;

        let seed_data = var("SEED_DATA")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(is_development);

        Ok(Self {
            database_url,
            http_port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            jwt_secret,
            jwt_expire,
            client_url: var("CLIENT_URL"),
            db_max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(20),
            db_acquire_timeout: Duration::from_millis(
                var("DB_ACQUIRE_TIMEOUT_MS")
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(2000),
            ),
            seed_data,
            seed_admin_email: var("SEED_ADMIN_EMAIL"),
            seed_admin_password: var("SEED_ADMIN_PASSWORD"),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, BoxError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.is_development());
        assert_eq!(config.http_port, 5001);
        assert!(config.database_url.is_none());
        assert_eq!(config.jwt_expire, Duration::from_secs(24 * 3600));
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(2));
        assert!(config.seed_data);
    }

    #[test]
    fn test_production_requires_secret_and_database() {
        let err = load(&[("ENVIRONMENT", "production"), ("DATABASE_URL", "postgres://x")])
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let err = load(&[("NODE_ENV", "production"), ("JWT_SECRET", "s")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));

        let config = load(&[
            ("ENVIRONMENT", "production"),
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "s"),
        ])
        .unwrap();
        assert!(!config.seed_data);
    }

    #[test]
    fn test_database_url_from_parts() {
        let config = load(&[
            ("DB_HOST", "db"),
            ("DB_USER", "hr"),
            ("DB_PASSWORD", "pw"),
            ("DB_NAME", "people"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://hr:pw@db:5432/people")
        );
    }

    #[test]
    fn test_jwt_expire_parsing() {
        let config = load(&[("JWT_EXPIRE", "90m")]).unwrap();
        assert_eq!(config.jwt_expire, Duration::from_secs(90 * 60));
        assert!(load(&[("JWT_EXPIRE", "soon")]).is_err());
    }
}
