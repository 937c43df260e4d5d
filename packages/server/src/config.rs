use anyhow::{ensure, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Seeds the settings store at startup so a deployment can bootstrap
    /// without touching the settings page. The page can still change it.
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub word_limit: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let word_limit = match env::var("SUMMARY_WORD_LIMIT") {
            Ok(value) => {
                let limit: u32 = value
                    .parse()
                    .context("SUMMARY_WORD_LIMIT must be a number")?;
                ensure!(limit > 0, "SUMMARY_WORD_LIMIT must be positive");
                Some(limit)
            }
            Err(_) => None,
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env::var("OPENAI_BASE_URL").ok(),
            word_limit,
        })
    }
}
