//! Delete every user and leave request. Takes no arguments and never prompts.

use tracing_subscriber::EnvFilter;

use leavedesk::config::Config;
use leavedesk::maintenance;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    // Failures are logged, not reflected in the exit status.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };

    let pool = match maintenance::open(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("{e}");
            return;
        }
    };

    match maintenance::wipe(&pool).await {
        Ok(()) => println!("All records deleted successfully."),
        Err(e) => tracing::error!("Failed to delete records: {e}"),
    }

    pool.close().await;
}
