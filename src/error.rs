use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::middleware::auth_redirect::LoginRequired;
use crate::models::LeaveStatus;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    DuplicateEmail,
    InvalidCredentials,
    InvalidTransition { leave_id: i64, status: LeaveStatus },
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::DuplicateEmail => write!(f, "Duplicate Email"),
            AppError::InvalidCredentials => write!(f, "Invalid Credentials"),
            AppError::InvalidTransition { leave_id, status } => {
                write!(f, "Invalid Transition: leave request {leave_id} is already {status}")
            }
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text safe to show inline on a page. Store and internal failures are
    /// logged here and replaced by a generic message.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg) => msg.clone(),
            AppError::DuplicateEmail => "An account with this email already exists.".to_string(),
            AppError::InvalidCredentials => "Incorrect email or password".to_string(),
            AppError::InvalidTransition { leave_id, status } => {
                format!("Leave request {leave_id} has already been {}.", status.as_str().to_lowercase())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                GENERIC_FAILURE.to_string()
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                GENERIC_FAILURE.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let login_required = matches!(self, AppError::Unauthorized(_));
        let mut response = (self.status(), self.public_message()).into_response();
        if login_required {
            response.extensions_mut().insert(LoginRequired);
        }
        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}
