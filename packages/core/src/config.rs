use std::env;

use crate::cli::Cli;

/// Default oracle endpoint (ethgasstation-style JSON).
pub const DEFAULT_ORACLE_URL: &str = "https://ethgasstation.info/json/ethgasAPI.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub oracle_url: String,
    pub poll_interval_seconds: u64,
    /// "Last N records" window served by the read endpoints. 240 covers
    /// one hour at a 4-record cycle per minute.
    pub window_records: usize,
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            oracle_url: env::var("ORACLE_URL").unwrap_or_else(|_| DEFAULT_ORACLE_URL.to_string()),
            poll_interval_seconds: parse_env("POLL_INTERVAL_SECONDS", 60)?,
            window_records: parse_env("WINDOW_RECORDS", 240)?,
            port: parse_env("PORT", 8080)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://gas_estimates.db".to_string()),
        })
    }

    /// CLI flags take precedence over environment variables.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.oracle_url {
            self.oracle_url = url.clone();
        }
        if let Some(interval) = cli.poll_interval {
            self.poll_interval_seconds = interval;
        }
        if let Some(window) = cli.window_records {
            self.window_records = window;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        self
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{name} must be a valid number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
