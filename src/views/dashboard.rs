use askama::Template;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::accounts;
use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::leave;
use crate::models::{Decision, LeaveType, Role};
use crate::state::SharedState;
use crate::views::render;

#[derive(Template)]
#[template(path = "dashboard/employee.html")]
struct EmployeeTemplate {
    user_name: String,
    manager_name: String,
    leave_types: Vec<&'static str>,
    requests: Vec<OwnRow>,
    notice: Option<String>,
    error: Option<String>,
}

struct OwnRow {
    application_date: String,
    leave_type: &'static str,
    manager_name: String,
    comment: String,
    status: &'static str,
}

#[derive(Template)]
#[template(path = "dashboard/manager.html")]
struct ManagerTemplate {
    user_name: String,
    requests: Vec<PendingRow>,
    notice: Option<String>,
    error: Option<String>,
}

struct PendingRow {
    id: i64,
    employee_name: String,
    leave_type: &'static str,
    application_date: String,
    comment: String,
    status: &'static str,
}

#[derive(Deserialize)]
pub struct LeaveForm {
    #[serde(default)]
    pub leave_type: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// What to show above the dashboard after a command ran.
enum Outcome {
    None,
    Notice(String),
    Failed(AppError),
}

pub async fn index(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Response, AppError> {
    match auth.role {
        Role::Employee => employee_view(&state, auth, Outcome::None).await,
        Role::Manager => manager_view(&state, auth, Outcome::None).await,
    }
}

pub async fn submit_leave(
    auth: AuthUser,
    State(state): State<SharedState>,
    Form(form): Form<LeaveForm>,
) -> Result<Response, AppError> {
    auth.require_employee()?;

    let submitted = match form.leave_type.trim().parse::<LeaveType>() {
        Ok(leave_type) => {
            leave::submit(&state.pool, auth.user_id, leave_type, form.comment.as_deref()).await
        }
        Err(e) => Err(AppError::Validation(e)),
    };
    let outcome = match submitted {
        Ok(_) => Outcome::Notice("Leave application submitted successfully!".to_string()),
        Err(e) => Outcome::Failed(e),
    };
    employee_view(&state, auth, outcome).await
}

pub async fn approve(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    decide(&state, auth, id, Decision::Approve).await
}

pub async fn reject(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    decide(&state, auth, id, Decision::Reject).await
}

async fn decide(
    state: &SharedState,
    auth: AuthUser,
    id: i64,
    decision: Decision,
) -> Result<Response, AppError> {
    auth.require_manager()?;

    let outcome = match leave::decide(&state.pool, auth.user_id, id, decision).await {
        Ok(updated) => Outcome::Notice(format!(
            "Leave request {} {}",
            updated.id,
            decision.past_tense()
        )),
        Err(e) => Outcome::Failed(e),
    };
    // The pending list is re-queried so the decided row drops out.
    manager_view(state, auth, outcome).await
}

async fn employee_view(
    state: &SharedState,
    auth: AuthUser,
    outcome: Outcome,
) -> Result<Response, AppError> {
    let user = accounts::find_user(&state.pool, auth.user_id).await?;
    let manager_name = accounts::manager_name(&state.pool, user.manager_id).await?;
    let requests = leave::list_own(&state.pool, auth.user_id).await?;

    let (status, notice, error) = split(outcome);
    let template = EmployeeTemplate {
        user_name: user.name,
        manager_name,
        leave_types: LeaveType::ALL.iter().map(LeaveType::as_str).collect(),
        requests: requests
            .into_iter()
            .map(|r| OwnRow {
                application_date: r.application_date.format("%Y-%m-%d").to_string(),
                leave_type: r.leave_type.as_str(),
                manager_name: r.manager_name,
                comment: r.comment.unwrap_or_default(),
                status: r.status.as_str(),
            })
            .collect(),
        notice,
        error,
    };
    Ok((status, render(&template)).into_response())
}

async fn manager_view(
    state: &SharedState,
    auth: AuthUser,
    outcome: Outcome,
) -> Result<Response, AppError> {
    let user = accounts::find_user(&state.pool, auth.user_id).await?;
    let requests = leave::list_pending(&state.pool, auth.user_id).await?;

    let (status, notice, error) = split(outcome);
    let template = ManagerTemplate {
        user_name: user.name,
        requests: requests
            .into_iter()
            .map(|r| PendingRow {
                id: r.id,
                employee_name: r.employee_name,
                leave_type: r.leave_type.as_str(),
                application_date: r.application_date.format("%Y-%m-%d").to_string(),
                comment: r.comment.unwrap_or_default(),
                status: r.status.as_str(),
            })
            .collect(),
        notice,
        error,
    };
    Ok((status, render(&template)).into_response())
}

fn split(outcome: Outcome) -> (StatusCode, Option<String>, Option<String>) {
    match outcome {
        Outcome::None => (StatusCode::OK, None, None),
        Outcome::Notice(msg) => (StatusCode::OK, Some(msg), None),
        Outcome::Failed(err) => (err.status(), None, Some(err.public_message())),
    }
}
