//! Sign-up, login and manager lookups.

use sqlx::SqlitePool;

use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::models::{ManagerOption, Role, User};
use crate::session::Session;

/// Shown wherever an employee's manager cannot be resolved.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub manager_id: Option<i64>,
}

/// Create a user. Employees must name an existing manager; managers never
/// carry one, whatever was submitted.
pub async fn signup(pool: &SqlitePool, account: NewAccount) -> Result<User, AppError> {
    if account.name.trim().is_empty()
        || account.email.trim().is_empty()
        || account.password.is_empty()
    {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    let manager_id = match account.role {
        Role::Manager => None,
        Role::Employee => {
            let Some(id) = account.manager_id else {
                let message = if db::users::list_managers(pool).await?.is_empty() {
                    "No managers available. Please sign up as a manager first."
                } else {
                    "Please select a manager."
                };
                return Err(AppError::Validation(message.to_string()));
            };
            if db::users::find_manager(pool, id).await?.is_none() {
                return Err(AppError::Validation(
                    "Selected manager does not exist".to_string(),
                ));
            }
            Some(id)
        }
    };

    let pw_hash = password::hash(&account.password).map_err(AppError::Internal)?;

    // The UNIQUE constraint is the only duplicate check; a pre-check would race.
    let user = db::users::create(
        pool,
        &account.name,
        &account.email,
        &pw_hash,
        account.role,
        manager_id,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateEmail
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::Validation("Selected manager does not exist".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = user.id, role = %user.role, "user signed up");
    Ok(user)
}

pub async fn login(pool: &SqlitePool, email: &str, password: &str) -> Result<Session, AppError> {
    let Some(user) = db::users::find_by_email(pool, email).await? else {
        tracing::warn!("login failed: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    let valid = match password::verify(password, &user.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(user_id = user.id, "stored password is not a usable hash: {e}");
            false
        }
    };

    if !valid {
        tracing::warn!(user_id = user.id, "login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = user.id, role = %user.role, "user logged in");
    Ok(Session {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn manager_name(pool: &SqlitePool, manager_id: Option<i64>) -> Result<String, AppError> {
    let Some(id) = manager_id else {
        return Ok(UNASSIGNED.to_string());
    };
    Ok(db::users::find_name_by_id(pool, id)
        .await?
        .unwrap_or_else(|| UNASSIGNED.to_string()))
}

pub async fn list_managers(pool: &SqlitePool) -> Result<Vec<ManagerOption>, AppError> {
    Ok(db::users::list_managers(pool).await?)
}

pub async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<User, AppError> {
    db::users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
}
