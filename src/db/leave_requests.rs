use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{LeaveRequest, LeaveStatus, LeaveType, PendingLeave};

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    leave_type: LeaveType,
    application_date: NaiveDate,
    comment: Option<&str>,
) -> Result<LeaveRequest, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "INSERT INTO LeaveRequests (user_id, leave_type, application_date, comment)
         VALUES (?1, ?2, ?3, ?4) RETURNING *",
    )
    .bind(user_id)
    .bind(leave_type)
    .bind(application_date)
    .bind(comment)
    .fetch_one(pool)
    .await
}

pub async fn list_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM LeaveRequests WHERE user_id = ?1 ORDER BY leave_id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn list_pending_for_manager(
    pool: &SqlitePool,
    manager_id: i64,
) -> Result<Vec<PendingLeave>, sqlx::Error> {
    sqlx::query_as::<_, PendingLeave>(
        "SELECT lr.leave_id, u.name AS employee_name, lr.leave_type,
                lr.application_date, lr.comment, lr.status
         FROM LeaveRequests lr
         JOIN Users u ON lr.user_id = u.user_id
         WHERE u.manager_id = ?1 AND lr.status = ?2
         ORDER BY lr.leave_id",
    )
    .bind(manager_id)
    .bind(LeaveStatus::Waiting)
    .fetch_all(pool)
    .await
}

/// Scoped lookup: only returns the request if its owner reports to `manager_id`.
pub async fn find_for_manager(
    pool: &SqlitePool,
    id: i64,
    manager_id: i64,
) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "SELECT lr.* FROM LeaveRequests lr
         JOIN Users u ON lr.user_id = u.user_id
         WHERE lr.leave_id = ?1 AND u.manager_id = ?2",
    )
    .bind(id)
    .bind(manager_id)
    .fetch_optional(pool)
    .await
}

/// Moves a Waiting request owned by one of `manager_id`'s reports to `status`.
/// Returns `None` when no row matched, so concurrent deciders cannot both win.
pub async fn update_status_if_waiting(
    pool: &SqlitePool,
    id: i64,
    manager_id: i64,
    status: LeaveStatus,
) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>(
        "UPDATE LeaveRequests SET status = ?3
         WHERE leave_id = ?1
           AND status = ?4
           AND user_id IN (SELECT user_id FROM Users WHERE manager_id = ?2)
         RETURNING *",
    )
    .bind(id)
    .bind(manager_id)
    .bind(status)
    .bind(LeaveStatus::Waiting)
    .fetch_optional(pool)
    .await
}

pub async fn count_all<'e, E: sqlx::SqliteExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM LeaveRequests")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}
