//! bcrypt password hashing
//!
//! Hashing runs on the blocking pool; a cost-12 hash takes long enough to
//! stall a runtime worker.

use crate::BoxError;

/// Cost for ordinary accounts
pub const DEFAULT_COST: u32 = 10;
/// Cost for administrator accounts
pub const ADMIN_COST: u32 = 12;

pub async fn hash_password(password: &str, cost: u32) -> Result<String, BoxError> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// A malformed stored hash verifies as `false`
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
