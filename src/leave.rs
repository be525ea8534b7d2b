//! Leave submission, listing and the Waiting → Approved/Rejected transition.

use chrono::Local;
use sqlx::SqlitePool;

use crate::accounts;
use crate::db;
use crate::error::AppError;
use crate::models::{Decision, LeaveRequest, LeaveType, OwnLeaveRequest, PendingLeave, Role};

/// File a new Waiting request dated with the server's current date.
pub async fn submit(
    pool: &SqlitePool,
    user_id: i64,
    leave_type: LeaveType,
    comment: Option<&str>,
) -> Result<LeaveRequest, AppError> {
    let user = accounts::find_user(pool, user_id).await?;
    if user.role != Role::Employee {
        return Err(AppError::Forbidden(
            "Only employees can apply for leave".to_string(),
        ));
    }

    let comment = comment.map(str::trim).filter(|c| !c.is_empty());
    let today = Local::now().date_naive();

    let request = db::leave_requests::create(pool, user_id, leave_type, today, comment).await?;
    tracing::info!(leave_id = request.id, user_id, %leave_type, "leave request submitted");
    Ok(request)
}

pub async fn list_own(pool: &SqlitePool, user_id: i64) -> Result<Vec<OwnLeaveRequest>, AppError> {
    let user = accounts::find_user(pool, user_id).await?;
    // Manager assignment is fixed at sign-up, so one lookup serves every row.
    let manager_name = accounts::manager_name(pool, user.manager_id).await?;

    let requests = db::leave_requests::list_by_user(pool, user_id).await?;
    Ok(requests
        .into_iter()
        .map(|r| OwnLeaveRequest {
            id: r.id,
            application_date: r.application_date,
            leave_type: r.leave_type,
            manager_name: manager_name.clone(),
            comment: r.comment,
            status: r.status,
        })
        .collect())
}

pub async fn list_pending(pool: &SqlitePool, manager_id: i64) -> Result<Vec<PendingLeave>, AppError> {
    Ok(db::leave_requests::list_pending_for_manager(pool, manager_id).await?)
}

/// Apply `decision` to a Waiting request of one of `manager_id`'s reports and
/// return the updated row.
pub async fn decide(
    pool: &SqlitePool,
    manager_id: i64,
    leave_id: i64,
    decision: Decision,
) -> Result<LeaveRequest, AppError> {
    let target = decision.target();

    if let Some(updated) =
        db::leave_requests::update_status_if_waiting(pool, leave_id, manager_id, target).await?
    {
        tracing::info!(leave_id, manager_id, status = %updated.status, "leave request decided");
        return Ok(updated);
    }

    // Nothing matched: either not ours to decide, or already decided.
    let existing = db::leave_requests::find_for_manager(pool, leave_id, manager_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Leave request {leave_id} not found")))?;

    match existing.status.apply(decision) {
        None => {
            tracing::warn!(leave_id, manager_id, status = %existing.status, "decision on settled request");
            Err(AppError::InvalidTransition {
                leave_id,
                status: existing.status,
            })
        }
        Some(_) => Err(AppError::Internal(format!(
            "leave request {leave_id} is Waiting but the update matched no row"
        ))),
    }
}
