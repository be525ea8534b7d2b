//! Print every user row to stdout.

use std::io::Write;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use leavedesk::config::Config;
use leavedesk::maintenance;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let result = async {
        let config = Config::from_env()?;
        let pool = maintenance::open(&config).await?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        maintenance::dump_users(&pool, &mut out).await?;
        out.flush().map_err(|e| format!("Failed to flush stdout: {e}"))?;
        pool.close().await;
        Ok::<(), String>(())
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
