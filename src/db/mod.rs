pub mod leave_requests;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Open the single-file store. `timeout` bounds both lock waits and pool checkout.
pub async fn connect(database_url: &str, timeout: Duration) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(timeout);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(timeout)
        .connect_with(options)
        .await
}

/// Create both tables if absent.
pub async fn init(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Delete every row from both tables.
pub async fn wipe_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM LeaveRequests")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM Users").execute(&mut *tx).await?;
    tx.commit().await
}
