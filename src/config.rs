use serde::Deserialize;
use std::env;

use crate::constants::{DEFAULT_ETHERSCAN_API_URL, DEFAULT_FETCH_TIMEOUT_SECS};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Block explorer
    pub etherscan_api_url: String,
    pub etherscan_api_key: String,
    pub fetch_timeout_secs: u64,

    // CORS
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),

            etherscan_api_url: env::var("ETHERSCAN_API_URL")
                .unwrap_or_else(|_| DEFAULT_ETHERSCAN_API_URL.to_string()),
            // Absent credential is tolerated; the explorer enforces on its side.
            etherscan_api_key: env::var("ETHERSCAN_API_KEY").unwrap_or_default(),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse::<u64>().ok())
                .filter(|value| *value > 0)
                .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.etherscan_api_url.trim().is_empty() {
            anyhow::bail!("ETHERSCAN_API_URL is empty");
        }

        if self.etherscan_api_key.trim().is_empty() {
            tracing::warn!(
                "ETHERSCAN_API_KEY is not set; the explorer may reject or rate-limit requests"
            );
        }
        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }
}
