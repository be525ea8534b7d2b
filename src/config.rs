use std::net::IpAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Upper bound on waiting for a pooled connection or a store lock.
    pub db_timeout: Duration,
    pub request_timeout: Duration,
    pub max_body_size: usize,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_or("DATABASE_URL", "sqlite:leave_management.db");

        let host: IpAddr = env_or("LEAVEDESK_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid LEAVEDESK_HOST: {e}"))?;

        let port: u16 = env_or("LEAVEDESK_PORT", "8501")
            .parse()
            .map_err(|e| format!("Invalid LEAVEDESK_PORT: {e}"))?;

        let log_level = env_or("LEAVEDESK_LOG_LEVEL", "info");

        let db_timeout = parse_secs("LEAVEDESK_DB_TIMEOUT_SECS", &env_or("LEAVEDESK_DB_TIMEOUT_SECS", "5"))?;
        let request_timeout = parse_secs(
            "LEAVEDESK_REQUEST_TIMEOUT_SECS",
            &env_or("LEAVEDESK_REQUEST_TIMEOUT_SECS", "30"),
        )?;

        let max_body_size: usize = env_or("LEAVEDESK_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid LEAVEDESK_MAX_BODY_SIZE: {e}"))?;

        let secure_cookies = parse_bool(
            "LEAVEDESK_SECURE_COOKIES",
            &env_or("LEAVEDESK_SECURE_COOKIES", "false"),
        )?;

        Ok(Config {
            database_url,
            host,
            port,
            log_level,
            db_timeout,
            request_timeout,
            max_body_size,
            secure_cookies,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, String> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(format!("Invalid {key}: must be greater than zero")),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(format!("Invalid {key}: {e}")),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("Invalid {key}: '{other}' is not a boolean")),
    }
}
