//! Application state

use std::sync::Arc;
use std::time::Instant;

use crate::BoxError;
use crate::auth::TokenService;
use crate::config::Config;
use crate::db::{MemoryStore, PgStore, Store, seed};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (PostgreSQL or in-memory)
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Self {
        Self {
            store,
            tokens: TokenService::new(&config.jwt_secret, config.jwt_expire),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    /// Connect storage, run migrations and seed as configured
    pub async fn new(config: Config) -> Result<Self, BoxError> {
        let store: Arc<dyn Store> = match &config.database_url {
            Some(url) => Arc::new(PgStore::connect(url, &config).await?),
            None => {
                tracing::warn!("No DATABASE_URL configured, using the in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        if config.seed_data {
            seed::run(store.as_ref(), &config).await?;
        }

        Ok(Self::with_store(config, store))
    }
}
