use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::Department;

use super::PgStore;
use crate::db::{DepartmentStore, RepoResult};

#[derive(sqlx::FromRow)]
struct DepartmentRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<DepartmentRow> for Department {
    fn from(r: DepartmentRow) -> Self {
        Department {
            id: r.id,
            name: r.name,
            description: r.description,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl DepartmentStore for PgStore {
    async fn find_department(&self, id: i64) -> RepoResult<Option<Department>> {
        let row: Option<DepartmentRow> = sqlx::query_as("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_department_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        let row: Option<DepartmentRow> =
            sqlx::query_as("SELECT * FROM departments WHERE LOWER(name) = LOWER($1)")
                .bind(name.trim())
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Into::into))
    }

    async fn list_departments(&self) -> RepoResult<Vec<Department>> {
        let rows: Vec<DepartmentRow> = sqlx::query_as("SELECT * FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ensure_departments(&self, departments: &[(&str, &str)]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;
        for (name, description) in departments {
            sqlx::query(
                "INSERT INTO departments (name, description) VALUES ($1, $2)
                 ON CONFLICT (name) DO NOTHING",
            )
            .bind(*name)
            .bind(*description)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
