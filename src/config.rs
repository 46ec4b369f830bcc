//! Server configuration loaded from the process environment.

use std::time::Duration;

use anyhow::{anyhow, Result};

/// Default completion model
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default base URL for the completion API
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Origin of the diagram frontend, allowed by the CORS layer
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:4200";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub frontend_origin: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only `OPENAI_API_KEY` is required; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let frontend_origin = std::env::var("FRONTEND_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGIN.to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .unwrap_or(8000);

        let timeout_seconds = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .unwrap_or(30);

        Ok(Self {
            api_key,
            model,
            base_url,
            frontend_origin,
            port,
            request_timeout: Duration::from_secs(timeout_seconds),
        })
    }
}
