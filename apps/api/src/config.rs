use anyhow::{bail, Context, Result};

/// Shortest accepted `SECRET_KEY`, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
/// Fails at startup if `SECRET_KEY` is missing or too short.
#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub database_url: String,
    pub catalog_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let secret_key = require_env("SECRET_KEY")?;
        if secret_key.len() < MIN_SECRET_LEN {
            bail!("SECRET_KEY must be at least {MIN_SECRET_LEN} bytes long");
        }

        Ok(Config {
            secret_key,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://users.db?mode=rwc".to_string()),
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or_else(|_| "data.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
