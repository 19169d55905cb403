use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::MAX_ATTEMPTS;

/// Application configuration loaded from environment variables.
/// Every variable is optional; without an API key the service runs on the
/// rule-based feedback and static question banks.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub feedback_timeout: Duration,
    pub llm_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: parse_env("PORT", 3000).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            feedback_timeout: Duration::from_secs(
                parse_env("FEEDBACK_TIMEOUT_SECS", 10)
                    .context("FEEDBACK_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            llm_max_attempts: parse_env::<u32>("LLM_MAX_ATTEMPTS", 1)
                .context("LLM_MAX_ATTEMPTS must be a non-negative integer")?
                .clamp(1, MAX_ATTEMPTS),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Could not parse environment variable '{key}'={raw:?}")),
        Err(_) => Ok(default),
    }
}
