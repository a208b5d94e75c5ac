//! First-start seeding: default departments and an optional bootstrap admin

use shared::models::{DEFAULT_DEPARTMENTS, Role};

use crate::BoxError;
use crate::auth::password::{ADMIN_COST, hash_password};
use crate::config::Config;
use crate::db::{NewUser, RepoError, Store, normalize_email};

pub async fn run(store: &dyn Store, config: &Config) -> Result<(), BoxError> {
    store.ensure_departments(&DEFAULT_DEPARTMENTS).await?;
    tracing::info!(count = DEFAULT_DEPARTMENTS.len(), "Default departments ensured");

    let (Some(email), Some(password)) = (&config.seed_admin_email, &config.seed_admin_password)
    else {
        return Ok(());
    };
    if store.find_by_email(email).await?.is_some() {
        return Ok(());
    }

    let admin = NewUser {
        email: normalize_email(email),
        password_hash: hash_password(password, ADMIN_COST).await?,
        first_name: "Admin".into(),
        last_name: "User".into(),
        role: Role::Admin,
        department_id: None,
        position: Some("System Administrator".into()),
        salary: None,
        phone: None,
    };
    match store.create_user(admin).await {
        Ok(user) => tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created"),
        // Another instance seeded first
        Err(RepoError::Duplicate(_)) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
