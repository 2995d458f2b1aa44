use anyhow::{Context, Result};
use serde::Serialize;

/// Keys from the provider always start with this prefix.
const API_KEY_PREFIX: &str = "sk-";

const DEFAULT_SOLAR_WIND_URL: &str =
    "https://services.swpc.noaa.gov/products/summary/solar-wind-speed.json";

/// Application configuration loaded once from environment variables at
/// startup and shared read-only afterwards.
///
/// A missing API key is not fatal: generation endpoints fall back to local
/// content and `/api/config-status` reports the problem.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub solar_wind_url: String,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub credential: ApiCredential,
    pub model: String,
    pub base_url: String,
    /// Budget for full articles.
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai: OpenAiConfig {
                credential: ApiCredential::new(std::env::var("OPENAI_API_KEY").ok()),
                model: env_or("OPENAI_MODEL", "gpt-4o"),
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                max_tokens: env_or("OPENAI_MAX_TOKENS", "1500")
                    .parse::<u32>()
                    .context("OPENAI_MAX_TOKENS must be a positive integer")?,
            },
            solar_wind_url: env_or("SOLAR_WIND_URL", DEFAULT_SOLAR_WIND_URL),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// The provider API key. `Debug` never prints the secret.
#[derive(Clone, Default)]
pub struct ApiCredential(Option<String>);

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiCredential").field(&self.masked()).finish()
    }
}

/// Public view of the credential for `/api/config-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub configured: bool,
    pub valid: bool,
    pub masked: String,
}

impl ApiCredential {
    /// Blank values count as not configured.
    pub fn new(key: Option<String>) -> Self {
        Self(key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()))
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_valid(&self) -> bool {
        self.valid_key().is_some()
    }

    /// The key, only when it passes the prefix check.
    pub fn valid_key(&self) -> Option<&str> {
        self.0.as_deref().filter(|k| k.starts_with(API_KEY_PREFIX))
    }

    /// First 7 and last 4 characters; short keys are hidden entirely.
    pub fn masked(&self) -> String {
        let Some(key) = &self.0 else {
            return "Not configured".to_string();
        };

        let chars: Vec<char> = key.chars().collect();
        if chars.len() <= 11 {
            return "***".to_string();
        }

        let head: String = chars[..7].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }

    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            configured: self.is_configured(),
            valid: self.is_valid(),
            masked: self.masked(),
        }
    }
}
