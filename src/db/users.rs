use sqlx::SqlitePool;

use crate::models::{ManagerOption, Role, User};

pub async fn create<'e, E: sqlx::SqliteExecutor<'e>>(
    executor: E,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
    manager_id: Option<i64>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO Users (name, email, password, role, manager_id)
         VALUES (?1, ?2, ?3, ?4, ?5) RETURNING *",
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(manager_id)
    .fetch_one(executor)
    .await
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM Users WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM Users WHERE user_id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_name_by_id(pool: &SqlitePool, id: i64) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT name FROM Users WHERE user_id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Only matches users whose role is Manager.
pub async fn find_manager(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM Users WHERE user_id = ?1 AND role = ?2")
        .bind(id)
        .bind(Role::Manager)
        .fetch_optional(pool)
        .await
}

pub async fn list_managers(pool: &SqlitePool) -> Result<Vec<ManagerOption>, sqlx::Error> {
    sqlx::query_as::<_, ManagerOption>(
        "SELECT user_id, name FROM Users WHERE role = ?1 ORDER BY name, user_id",
    )
    .bind(Role::Manager)
    .fetch_all(pool)
    .await
}

pub async fn list_all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM Users ORDER BY user_id")
        .fetch_all(pool)
        .await
}

pub async fn count_all<'e, E: sqlx::SqliteExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM Users")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}
