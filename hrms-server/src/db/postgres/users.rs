use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{Employee, EmployeeUpdate, ReviewCandidate, Role, UserProfile};

use super::{PgStore, bad_column};
use crate::db::{
    Credentials, NewUser, ProfileChanges, RepoError, RepoResult, UserStore, normalize_email,
};

/// Columns selected for every [`Employee`] read
const EMPLOYEE_COLUMNS: &str = r#"
    u.id, u.email, u.password, u.first_name, u.last_name, u.role, u.department_id,
    d.name AS department_name, u.position, u.hire_date, u.salary, u.phone, u.address,
    u.is_active, u.created_at, u.updated_at
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    role: String,
    department_id: Option<i64>,
    department_name: Option<String>,
    position: Option<String>,
    hire_date: NaiveDate,
    salary: Decimal,
    phone: Option<String>,
    address: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_credentials(self) -> RepoResult<Credentials> {
        let role = Role::from_db(&self.role).ok_or_else(|| bad_column("users.role", &self.role))?;
        Ok(Credentials {
            user: Employee {
                id: self.id,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                role,
                department_id: self.department_id,
                department_name: self.department_name,
                position: self.position,
                hire_date: self.hire_date,
                salary: self.salary,
                phone: self.phone,
                address: self.address,
                is_active: self.is_active,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            password_hash: self.password,
        })
    }

    fn into_model(self) -> RepoResult<Employee> {
        self.into_credentials().map(|c| c.user)
    }
}

#[derive(sqlx::FromRow)]
struct CandidateRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    position: Option<String>,
    department_name: Option<String>,
}

impl PgStore {
    async fn fetch_employee(&self, id: i64) -> RepoResult<Option<Employee>> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM users u
             LEFT JOIN departments d ON d.id = u.department_id
             WHERE u.id = $1"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(UserRow::into_model).transpose()
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Credentials>> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM users u
             LEFT JOIN departments d ON d.id = u.department_id
             WHERE LOWER(u.email) = $1"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;
        row.map(UserRow::into_credentials).transpose()
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Employee>> {
        self.fetch_employee(id).await
    }

    async fn find_active_by_id(&self, id: i64) -> RepoResult<Option<UserProfile>> {
        Ok(self
            .fetch_employee(id)
            .await?
            .filter(|e| e.is_active)
            .map(|e| e.profile()))
    }

    async fn create_user(&self, user: NewUser) -> RepoResult<Employee> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (
                email, password, first_name, last_name, role,
                department_id, position, salary, phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0), $9)
            RETURNING id
            "#,
        )
        .bind(normalize_email(&user.email))
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.role.as_str())
        .bind(user.department_id)
        .bind(&user.position)
        .bind(user.salary)
        .bind(&user.phone)
        .fetch_one(&self.pool)
        .await?;

        self.fetch_employee(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {id}")))
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> RepoResult<Option<Employee>> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                department_id = COALESCE($3, department_id),
                position = COALESCE($4, position),
                updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(changes.department_id)
        .bind(&changes.position)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_employee(id).await
    }

    async fn update_employee(&self, id: i64, changes: EmployeeUpdate) -> RepoResult<Option<Employee>> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                first_name = COALESCE($1, first_name),
                last_name = COALESCE($2, last_name),
                department_id = COALESCE($3, department_id),
                position = COALESCE($4, position),
                salary = COALESCE($5, salary),
                phone = COALESCE($6, phone),
                address = COALESCE($7, address),
                updated_at = NOW()
            WHERE id = $8
            "#,
        )
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(changes.department_id)
        .bind(&changes.position)
        .bind(changes.salary)
        .bind(&changes.phone)
        .bind(&changes.address)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_employee(id).await
    }

    async fn set_active(&self, id: i64, active: bool) -> RepoResult<Option<Employee>> {
        let updated = sqlx::query("UPDATE users SET is_active = $1, updated_at = NOW() WHERE id = $2")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_employee(id).await
    }

    async fn set_role(&self, id: i64, role: Role) -> RepoResult<Option<Employee>> {
        let updated = sqlx::query("UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2")
            .bind(role.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch_employee(id).await
    }

    async fn delete_non_admin(&self, id: i64) -> RepoResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1 AND role <> 'admin'")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    async fn list_non_admin(&self) -> RepoResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM users u
             LEFT JOIN departments d ON d.id = u.department_id
             WHERE u.role <> 'admin'
             ORDER BY u.created_at DESC, u.id DESC"
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        rows.into_iter().map(UserRow::into_model).collect()
    }

    async fn list_active_employees(&self) -> RepoResult<Vec<ReviewCandidate>> {
        let rows: Vec<CandidateRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.email, u.position,
                   d.name AS department_name
            FROM users u
            LEFT JOIN departments d ON d.id = u.department_id
            WHERE u.role = 'employee' AND u.is_active = TRUE
            ORDER BY u.first_name, u.last_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ReviewCandidate {
                id: r.id,
                first_name: r.first_name,
                last_name: r.last_name,
                email: r.email,
                position: r.position,
                department_name: r.department_name,
            })
            .collect())
    }
}
