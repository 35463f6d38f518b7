use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_ms: u64,
    pub strict_status: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_ms", &self.timeout_ms)
            .field("strict_status", &self.strict_status)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            strict_status: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. An unset or blank
    /// variable falls back to its default; a malformed one is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            api_key: lookup("OPENAI_API_KEY")
                .map(|key| key.trim().to_string())
                .unwrap_or_default(),
            base_url: get("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            max_tokens: parse_or(
                "COMPLETION_MAX_TOKENS",
                get("COMPLETION_MAX_TOKENS"),
                defaults.max_tokens,
            )?,
            temperature: parse_or(
                "COMPLETION_TEMPERATURE",
                get("COMPLETION_TEMPERATURE"),
                defaults.temperature,
            )?,
            timeout_ms: parse_or(
                "COMPLETION_TIMEOUT_MS",
                get("COMPLETION_TIMEOUT_MS"),
                defaults.timeout_ms,
            )?,
            strict_status: parse_or(
                "STRICT_STATUS_CODES",
                get("STRICT_STATUS_CODES"),
                defaults.strict_status,
            )?,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            }),
    }
}
