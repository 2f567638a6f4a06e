use anyhow::{Context, Result};

use crate::persist::SNAPSHOT_KEY;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub snapshot_path: String,
    pub autosave_debounce_ms: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("WIZARD_API_BASE_URL")?,
            snapshot_path: std::env::var("WIZARD_SNAPSHOT_PATH")
                .unwrap_or_else(|_| format!("{SNAPSHOT_KEY}.json")),
            autosave_debounce_ms: std::env::var("WIZARD_AUTOSAVE_MS")
                .unwrap_or_else(|_| "1500".to_string())
                .parse::<u64>()
                .context("WIZARD_AUTOSAVE_MS must be a number of milliseconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
