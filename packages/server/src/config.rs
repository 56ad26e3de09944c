use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// HTTP mail relay endpoint. When unset, outbound mail is logged only.
    pub mail_relay_url: Option<String>,
    pub mail_from: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            mail_relay_url: env::var("MAIL_RELAY_URL").ok(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@blood-connect.local".to_string()),
        })
    }
}
