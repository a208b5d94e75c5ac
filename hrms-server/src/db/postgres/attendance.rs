use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{AttendanceRecord, AttendanceStatus, CheckAction, DayStatus};
use sqlx::PgExecutor;

use super::{PgStore, bad_column};
use crate::attendance::{self, DayWindow, TransitionOutcome};
use crate::db::{AttendanceStore, RepoResult};

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: i64,
    user_id: i64,
    status: String,
    check_time: DateTime<Utc>,
    notes: Option<String>,
}

impl AttendanceRow {
    fn into_model(self) -> RepoResult<AttendanceRecord> {
        let status = AttendanceStatus::from_db(&self.status)
            .ok_or_else(|| bad_column("attendance.status", &self.status))?;
        Ok(AttendanceRecord {
            id: self.id,
            user_id: self.user_id,
            status,
            check_time: self.check_time,
            notes: self.notes,
        })
    }
}

async fn latest_in<'e>(
    executor: impl PgExecutor<'e>,
    user_id: i64,
    window: DayWindow,
) -> RepoResult<Option<AttendanceRecord>> {
    let row: Option<AttendanceRow> = sqlx::query_as(
        r#"
        SELECT id, user_id, status, check_time, notes
        FROM attendance
        WHERE user_id = $1 AND check_time >= $2 AND check_time < $3
        ORDER BY check_time DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(window.start)
    .bind(window.end)
    .fetch_optional(executor)
    .await?;
    row.map(AttendanceRow::into_model).transpose()
}

#[async_trait]
impl AttendanceStore for PgStore {
    async fn latest_in(
        &self,
        user_id: i64,
        window: DayWindow,
    ) -> RepoResult<Option<AttendanceRecord>> {
        latest_in(&self.pool, user_id, window).await
    }

    async fn transition(
        &self,
        user_id: i64,
        action: CheckAction,
        notes: Option<String>,
    ) -> RepoResult<TransitionOutcome> {
        let mut tx = self.pool.begin().await?;

        // Serializes concurrent transitions for one user until commit
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        // The day is judged by the instant that gets recorded
        let now = Utc::now();
        let window = DayWindow::containing(now);
        let latest = latest_in(&mut *tx, user_id, window).await?;
        let status = match attendance::apply(DayStatus::from(latest.map(|r| r.status)), action) {
            Ok(status) => status,
            Err(rejected) => {
                tx.rollback().await?;
                return Ok(TransitionOutcome::Rejected(rejected));
            }
        };

        let row: AttendanceRow = sqlx::query_as(
            r#"
            INSERT INTO attendance (user_id, status, check_time, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, status, check_time, notes
            "#,
        )
        .bind(user_id)
        .bind(status.as_str())
        .bind(now)
        .bind(&notes)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        row.into_model().map(TransitionOutcome::Applied)
    }

    async fn history(&self, user_id: i64, since: DateTime<Utc>) -> RepoResult<Vec<AttendanceRecord>> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, status, check_time, notes
            FROM attendance
            WHERE user_id = $1 AND check_time >= $2
            ORDER BY check_time DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(AttendanceRow::into_model).collect()
    }
}
