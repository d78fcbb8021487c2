use anyhow::{Context, Result};

use crate::llm_client::API_KEY_ENV;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
///
/// The generation credential itself is absent: the LLM client reads the
/// variable named by `openai_api_key_env` on every call, so the service can
/// boot without it.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_api_key_env: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            Err(_) => defaults.port,
        };

        Ok(Config {
            openai_base_url: env_or("OPENAI_BASE_URL", defaults.openai_base_url),
            openai_model: env_or("OPENAI_MODEL", defaults.openai_model),
            openai_api_key_env: env_or("OPENAI_API_KEY_ENV", defaults.openai_api_key_env),
            port,
            rust_log: env_or("RUST_LOG", defaults.rust_log),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            openai_api_key_env: API_KEY_ENV.to_string(),
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
        }
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
