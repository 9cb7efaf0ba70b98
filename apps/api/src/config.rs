use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible default; nothing is required to boot.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory report files are written into.
    pub results_dir: PathBuf,
    /// Job sources to run, in order. Order is significant: collector batches
    /// are merged in this order, which pins down tie-breaking downstream.
    pub enabled_sources: Vec<String>,
    /// Per-collector timeout. A source that exceeds it contributes zero
    /// records; it does not abort the run.
    pub collector_timeout_secs: u64,
    /// Minimum spacing before each outbound call, honored inside collectors.
    pub request_delay_ms: u64,
    /// Cap on raw records taken from a single source per run.
    pub max_jobs_per_source: usize,
    /// Optional JSON file overriding the built-in scoring term tables.
    pub scoring_tables_path: Option<PathBuf>,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            results_dir: PathBuf::from(env_or("RESULTS_DIR", "results")),
            enabled_sources: env_or("ENABLED_SOURCES", "remoteok")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            collector_timeout_secs: env_or("COLLECTOR_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("COLLECTOR_TIMEOUT_SECS must be a number of seconds")?,
            request_delay_ms: env_or("REQUEST_DELAY_MS", "1000")
                .parse::<u64>()
                .context("REQUEST_DELAY_MS must be a number of milliseconds")?,
            max_jobs_per_source: env_or("MAX_JOBS_PER_SOURCE", "30")
                .parse::<usize>()
                .context("MAX_JOBS_PER_SOURCE must be a positive integer")?,
            scoring_tables_path: std::env::var("SCORING_TABLES_PATH")
                .ok()
                .map(PathBuf::from),
            user_agent: env_or(
                "USER_AGENT",
                concat!("jobscout/", env!("CARGO_PKG_VERSION")),
            ),
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "info".to_string(),
            results_dir: PathBuf::from("results"),
            enabled_sources: vec!["fixture".to_string()],
            collector_timeout_secs: 5,
            request_delay_ms: 0,
            max_jobs_per_source: 30,
            scoring_tables_path: None,
            user_agent: "jobscout-test".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
