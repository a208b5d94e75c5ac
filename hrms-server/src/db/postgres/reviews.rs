use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{EmployeeReview, NewReview, ReviewOverview, Role};

use super::{PgStore, bad_column};
use crate::db::{RepoResult, ReviewStore};

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    rating: i32,
    comments: Option<String>,
    review_date: DateTime<Utc>,
    reviewer_first_name: Option<String>,
    reviewer_last_name: Option<String>,
    reviewer_role: Option<String>,
}

#[derive(sqlx::FromRow)]
struct OverviewRow {
    #[sqlx(flatten)]
    review: ReviewRow,
    employee_first_name: String,
    employee_last_name: String,
    employee_email: String,
    employee_position: Option<String>,
    employee_department: Option<String>,
}

fn reviewer_role(value: Option<String>) -> RepoResult<Option<Role>> {
    value
        .map(|v| Role::from_db(&v).ok_or_else(|| bad_column("users.role", &v)))
        .transpose()
}

impl ReviewRow {
    fn into_model(self) -> RepoResult<EmployeeReview> {
        Ok(EmployeeReview {
            id: self.id,
            rating: self.rating,
            comments: self.comments,
            review_date: self.review_date,
            reviewer_first_name: self.reviewer_first_name,
            reviewer_last_name: self.reviewer_last_name,
            reviewer_role: reviewer_role(self.reviewer_role)?,
        })
    }
}

impl OverviewRow {
    fn into_model(self) -> RepoResult<ReviewOverview> {
        let review = self.review.into_model()?;
        Ok(ReviewOverview {
            id: review.id,
            rating: review.rating,
            comments: review.comments,
            review_date: review.review_date,
            employee_first_name: self.employee_first_name,
            employee_last_name: self.employee_last_name,
            employee_email: self.employee_email,
            employee_position: self.employee_position,
            employee_department: self.employee_department,
            reviewer_first_name: review.reviewer_first_name,
            reviewer_last_name: review.reviewer_last_name,
            reviewer_role: review.reviewer_role,
        })
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn add_review(&self, review: NewReview) -> RepoResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO performance_reviews (employee_id, reviewer_id, rating, comments)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(review.employee_id)
        .bind(review.reviewer_id)
        .bind(review.rating)
        .bind(&review.comments)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn reviews_for(&self, employee_id: i64) -> RepoResult<Vec<EmployeeReview>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT pr.id, pr.rating, pr.comments, pr.review_date,
                   r.first_name AS reviewer_first_name, r.last_name AS reviewer_last_name,
                   r.role AS reviewer_role
            FROM performance_reviews pr
            LEFT JOIN users r ON r.id = pr.reviewer_id
            WHERE pr.employee_id = $1
            ORDER BY pr.review_date DESC, pr.id DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ReviewRow::into_model).collect()
    }

    async fn all_reviews(&self) -> RepoResult<Vec<ReviewOverview>> {
        let rows: Vec<OverviewRow> = sqlx::query_as(
            r#"
            SELECT pr.id, pr.rating, pr.comments, pr.review_date,
                   e.first_name AS employee_first_name, e.last_name AS employee_last_name,
                   e.email AS employee_email, e.position AS employee_position,
                   d.name AS employee_department,
                   r.first_name AS reviewer_first_name, r.last_name AS reviewer_last_name,
                   r.role AS reviewer_role
            FROM performance_reviews pr
            JOIN users e ON e.id = pr.employee_id
            LEFT JOIN departments d ON d.id = e.department_id
            LEFT JOIN users r ON r.id = pr.reviewer_id
            ORDER BY pr.review_date DESC, pr.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(OverviewRow::into_model).collect()
    }
}
