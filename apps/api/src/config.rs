use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if `REDIS_URL` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Browser origin allowed by CORS. Unset means any origin.
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let redis_url = var("REDIS_URL")
            .context("Required environment variable 'REDIS_URL' is not set")?;
        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => 8080,
        };

        Ok(Config {
            redis_url,
            port,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            allowed_origin: var("CORS_ORIGIN"),
        })
    }
}
