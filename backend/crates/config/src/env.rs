use leanval_common::error::{LeanvalError, LeanvalResult};
use serde::Deserialize;
use std::env;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub cors_allowed_origins: Vec<String>,
    pub event_channel_capacity: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> LeanvalResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let event_channel_capacity: usize = get_var_or("EVENT_CHANNEL_CAPACITY", "256")
            .parse()
            .map_err(|e| LeanvalError::Config(format!("invalid EVENT_CHANNEL_CAPACITY: {e}")))?;
        if event_channel_capacity == 0 {
            return Err(LeanvalError::Config(
                "EVENT_CHANNEL_CAPACITY must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            database_url: get_var("DATABASE_URL")?,
            host: get_var_or("HOST", "0.0.0.0"),
            port: get_var_or("PORT", "8080")
                .parse()
                .map_err(|e| LeanvalError::Config(format!("invalid PORT: {e}")))?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            cors_allowed_origins: parse_origins(&get_var_or(
                "CORS_ALLOWED_ORIGINS",
                DEFAULT_CORS_ORIGINS,
            )),
            event_channel_capacity,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var(key: &str) -> LeanvalResult<String> {
    env::var(key).map_err(|_| LeanvalError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
