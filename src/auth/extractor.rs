use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::db;
use crate::error::AppError;
use crate::models::Role;
use crate::session::{Session, SESSION_COOKIE};
use crate::state::SharedState;

/// The session context handed to every authenticated view.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthUser {
    pub fn require_employee(&self) -> Result<(), AppError> {
        if self.role == Role::Employee {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only employees can apply for leave".to_string(),
            ))
        }
    }

    pub fn require_manager(&self) -> Result<(), AppError> {
        if self.role == Role::Manager {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only managers can review leave requests".to_string(),
            ))
        }
    }
}

impl From<Session> for AuthUser {
    fn from(session: Session) -> Self {
        AuthUser {
            user_id: session.user_id,
            role: session.role,
        }
    }
}

/// Resolve the session cookie, if any, to a live session whose user row
/// still exists. A session outliving its user is dropped from the store.
pub async fn current_session(
    jar: &CookieJar,
    state: &SharedState,
) -> Result<Option<Session>, AppError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };
    let Some(session) = state.sessions.get(cookie.value()) else {
        return Ok(None);
    };

    if db::users::find_by_id(&state.pool, session.user_id).await?.is_some() {
        return Ok(Some(session));
    }
    state.sessions.remove(cookie.value());
    tracing::info!("dropped session of deleted user {}", session.user_id);
    Ok(None)
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        current_session(&jar, state)
            .await?
            .map(AuthUser::from)
            .ok_or_else(|| {
                AppError::Unauthorized("Session expired or not logged in. Please log in again.".to_string())
            })
    }
}
