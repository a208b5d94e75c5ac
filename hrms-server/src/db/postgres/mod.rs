//! PostgreSQL store
//!
//! Runtime-checked `sqlx::query_as` against the schema in `migrations/`.
//! Row structs keep enum columns as `String`; conversion happens in
//! `into_model` so a bad column value surfaces as [`RepoError::Database`].

mod attendance;
mod departments;
mod leaves;
mod reviews;
mod users;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use super::{RepoError, RepoResult, Store};
use crate::BoxError;
use crate::config::Config;

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Client-caused write failures: foreign key violation, value too long for
/// its column, numeric field overflow
const CLIENT_CONSTRAINTS: [&str; 3] = ["23503", "22001", "22003"];

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and apply pending migrations
    pub async fn connect(url: &str, config: &Config) -> Result<Self, BoxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .idle_timeout(Duration::from_secs(30))
            .connect(url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!(
            max_connections = config.db_max_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool })
    }

}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                RepoError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db)
                if db
                    .code()
                    .is_some_and(|code| CLIENT_CONSTRAINTS.contains(&&*code)) =>
            {
                RepoError::Constraint(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Column value that failed to map onto a model enum
fn bad_column(column: &str, value: &str) -> RepoError {
    RepoError::Database(format!("unexpected {column} value {value:?}"))
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
