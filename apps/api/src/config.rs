use anyhow::{Context, Result};

use crate::llm_client::retry::RetryPolicy;

/// Environment variables consulted for the Gemini API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const DEFAULT_LANGUAGE: &str = "Korean";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
/// Upper bound on rate-limit retries; past this the doubling delay is hours long.
const MAX_RETRIES_LIMIT: u32 = 10;

/// Application configuration loaded from environment variables.
/// The API key is optional at startup; a missing key fails each analysis call instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub analysis_language: String,
    pub retry: RetryPolicy,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RetryPolicy::default();

        Ok(Config {
            gemini_api_key: api_key_from_env(),
            analysis_language: std::env::var("ANALYSIS_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            retry: RetryPolicy::new(
                check_max_retries(parse_env("ANALYSIS_MAX_RETRIES", defaults.max_retries)?)?,
                std::time::Duration::from_millis(parse_env(
                    "ANALYSIS_RETRY_INITIAL_MS",
                    defaults.initial_delay.as_millis() as u64,
                )?),
            ),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads the first non-empty API key variable. Called at startup and again per request.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn check_max_retries(max_retries: u32) -> Result<u32> {
    anyhow::ensure!(
        max_retries <= MAX_RETRIES_LIMIT,
        "ANALYSIS_MAX_RETRIES must be at most {MAX_RETRIES_LIMIT}, got {max_retries}"
    );
    Ok(max_retries)
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
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
