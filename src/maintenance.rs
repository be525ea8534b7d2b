//! Out-of-band store maintenance used by the `leavedesk-wipe` and
//! `leavedesk-dump-users` binaries.

use std::io::Write;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;
use crate::models::User;

/// Open the configured store and make sure both tables exist.
pub async fn open(config: &Config) -> Result<SqlitePool, String> {
    let pool = db::connect(&config.database_url, config.db_timeout)
        .await
        .map_err(|e| format!("Failed to open database: {e}"))?;
    db::init(&pool)
        .await
        .map_err(|e| format!("Failed to initialize schema: {e}"))?;
    Ok(pool)
}

/// Remove every user and leave request. No confirmation.
pub async fn wipe(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    db::wipe_all(pool).await?;
    tracing::info!("all records deleted");
    Ok(())
}

/// Print one line per user. The password hash column is left out.
pub async fn dump_users<W: Write>(pool: &SqlitePool, out: &mut W) -> Result<(), String> {
    let users = db::users::list_all(pool)
        .await
        .map_err(|e| format!("Failed to read users: {e}"))?;
    for user in &users {
        writeln!(out, "{}", format_user(user)).map_err(|e| format!("Failed to write: {e}"))?;
    }
    Ok(())
}

fn format_user(user: &User) -> String {
    let manager = user
        .manager_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "None".to_string());
    format!(
        "({}, '{}', '{}', '{}', {})",
        user.id, user.name, user.email, user.role, manager
    )
}
