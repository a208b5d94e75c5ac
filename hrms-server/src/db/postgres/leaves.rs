use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{Leave, LeaveStats, LeaveStatus, LeaveView, NewLeave};

use super::{PgStore, bad_column};
use crate::db::{LeaveStore, RepoResult};

const LEAVE_VIEW_SELECT: &str = r#"
    SELECT l.id, l.user_id, l.leave_type, l.start_date, l.end_date, l.reason, l.status,
           l.approved_by, l.created_at, l.updated_at,
           u.first_name, u.last_name, u.email,
           a.first_name AS approver_first_name, a.last_name AS approver_last_name
    FROM leaves l
    JOIN users u ON u.id = l.user_id
    LEFT JOIN users a ON a.id = l.approved_by
"#;

#[derive(sqlx::FromRow)]
struct LeaveRow {
    id: i64,
    user_id: i64,
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: Option<String>,
    status: String,
    approved_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LeaveRow {
    fn into_model(self) -> RepoResult<Leave> {
        let status =
            LeaveStatus::from_db(&self.status).ok_or_else(|| bad_column("leaves.status", &self.status))?;
        Ok(Leave {
            id: self.id,
            user_id: self.user_id,
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            status,
            approved_by: self.approved_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LeaveViewRow {
    #[sqlx(flatten)]
    leave: LeaveRow,
    first_name: String,
    last_name: String,
    email: String,
    approver_first_name: Option<String>,
    approver_last_name: Option<String>,
}

impl LeaveViewRow {
    fn into_model(self) -> RepoResult<LeaveView> {
        Ok(LeaveView {
            leave: self.leave.into_model()?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            approver_first_name: self.approver_first_name,
            approver_last_name: self.approver_last_name,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StatusCount {
    status: String,
    count: i64,
}

#[async_trait]
impl LeaveStore for PgStore {
    async fn create_leave(&self, leave: NewLeave) -> RepoResult<Leave> {
        let row: LeaveRow = sqlx::query_as(
            r#"
            INSERT INTO leaves (user_id, leave_type, start_date, end_date, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(leave.user_id)
        .bind(&leave.leave_type)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.reason)
        .fetch_one(&self.pool)
        .await?;
        row.into_model()
    }

    async fn find_leave(&self, id: i64) -> RepoResult<Option<LeaveView>> {
        let sql = format!("{LEAVE_VIEW_SELECT} WHERE l.id = $1");
        let row: Option<LeaveViewRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(LeaveViewRow::into_model).transpose()
    }

    async fn list_leaves(&self, owner: Option<i64>) -> RepoResult<Vec<LeaveView>> {
        let sql = format!(
            "{LEAVE_VIEW_SELECT} WHERE ($1::BIGINT IS NULL OR l.user_id = $1)
             ORDER BY l.created_at DESC, l.id DESC"
        );
        let rows: Vec<LeaveViewRow> = sqlx::query_as(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(LeaveViewRow::into_model).collect()
    }

    async fn set_leave_status(
        &self,
        id: i64,
        status: LeaveStatus,
        approver_id: i64,
    ) -> RepoResult<Option<Leave>> {
        let row: Option<LeaveRow> = sqlx::query_as(
            r#"
            UPDATE leaves SET status = $1, approved_by = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status.as_str())
        .bind(approver_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(LeaveRow::into_model).transpose()
    }

    async fn delete_pending_leave(&self, id: i64) -> RepoResult<bool> {
        let deleted = sqlx::query("DELETE FROM leaves WHERE id = $1 AND status = 'pending'")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    async fn leave_stats(&self, owner: Option<i64>) -> RepoResult<LeaveStats> {
        let rows: Vec<StatusCount> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*) AS count
            FROM leaves
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
            GROUP BY status
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let mut stats = LeaveStats::default();
        for row in rows {
            let status = LeaveStatus::from_db(&row.status)
                .ok_or_else(|| bad_column("leaves.status", &row.status))?;
            stats.total_leaves += row.count;
            match status {
                LeaveStatus::Pending => stats.pending_leaves = row.count,
                LeaveStatus::Approved => stats.approved_leaves = row.count,
                LeaveStatus::Rejected => stats.rejected_leaves = row.count,
            }
        }
        Ok(stats)
    }
}
