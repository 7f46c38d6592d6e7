use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; the service needs no secrets.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Per-request timeout for upstream ATS calls. Eight heterogeneous
    /// hosts are queried per aggregation; one hung upstream must not hold
    /// the whole query open indefinitely.
    pub http_timeout_secs: u64,
    /// Optional path to a JSON file overriding the built-in company list.
    pub sources_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a number of seconds")?,
            sources_file: std::env::var("SOURCES_FILE").ok(),
        })
    }
}
