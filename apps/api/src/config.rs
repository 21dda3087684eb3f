use anyhow::{Context, Result};

/// Signing secret used when `JWT_SECRET` is not provided.
pub const DEFAULT_JWT_SECRET: &str = "eduntra-secret-key-2025";

/// Application configuration loaded from environment variables.
/// Only `DATABASE_URL` is mandatory; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Overrides the database named in `database_url` when set.
    pub db_name: Option<String>,
    pub jwt_secret: String,
    pub anthropic_api_key: Option<String>,
    /// Comma-separated list, or `*` for any origin.
    pub cors_origins: Vec<String>,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_name: optional_env("DB_NAME"),
            jwt_secret: optional_env("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/eduntra_test".to_string(),
        db_name: None,
        jwt_secret: "test-secret".to_string(),
        anthropic_api_key: None,
        cors_origins: vec!["*".to_string()],
        llm_timeout_secs: 5,
        port: 0,
        rust_log: "debug".to_string(),
    }
}
