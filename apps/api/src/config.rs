use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::RetryPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm_api_url: String,
    pub llm_api_key: String,
    /// Sent as `model` in the completion request when set.
    pub llm_model: Option<String>,
    pub llm_timeout: Duration,
    pub llm_retry: RetryPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_retries = parse_env_or("LLM_MAX_RETRIES", 0u32)?;
        let base_delay_ms = parse_env_or("LLM_RETRY_BASE_DELAY_MS", 1000u64)?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            llm_api_url: require_env("LLM_API_URL")?,
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL").ok().filter(|m| !m.trim().is_empty()),
            llm_timeout: Duration::from_secs(parse_env_or("LLM_TIMEOUT_SECS", 120u64)?),
            llm_retry: RetryPolicy {
                max_retries,
                base_delay: Duration::from_millis(base_delay_ms),
            },
            port: parse_env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
