//! Runtime configuration sourced from the process environment.

use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.usemotion.com/v1";

/// Configuration for one fetch-then-export cycle.
///
/// The API key is never validated at startup: a run without a key sends
/// an empty `X-API-Key` header and fails with 401 on the first request.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Config {
    /// Reads configuration from the environment, seeding it from a local
    /// `.env` file first when one exists.
    pub fn load() -> Self {
        // A missing .env is the normal case, not an error.
        let _ = dotenvy::dotenv();

        let api_key = env::var("MOTION_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let base_url = env::var("MOTION_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self { api_key, base_url }
    }

    /// Value for the `X-API-Key` header; empty when no key is configured.
    pub fn api_key_header(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }
}
