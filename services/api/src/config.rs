//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use biblio_core::chat::DEFAULT_MODEL;
use std::net::SocketAddr;
use tracing::Level;

/// Base URL of Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_CHAT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Absent credential is a valid state: the assistant answers with its fallback.
    pub chat_api_key: Option<String>,
    pub chat_model: String,
    pub chat_api_base: String,
    pub cors_allow_origin: HeaderValue,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Server Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin_str =
            lookup("CORS_ALLOW_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let cors_allow_origin = cors_origin_str.parse::<HeaderValue>().map_err(|e| {
            ConfigError::InvalidValue("CORS_ALLOW_ORIGIN".to_string(), e.to_string())
        })?;

        // --- Chat Backend Settings (key is optional) ---
        let chat_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|key| !key.trim().is_empty());
        let chat_model = lookup("CHAT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let chat_api_base =
            lookup("CHAT_API_BASE").unwrap_or_else(|| DEFAULT_CHAT_API_BASE.to_string());

        Ok(Self {
            bind_address,
            log_level,
            chat_api_key,
            chat_model,
            chat_api_base,
            cors_allow_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.chat_model, "gemini-2.5-flash");
        assert_eq!(config.chat_api_base, DEFAULT_CHAT_API_BASE);
        assert!(config.chat_api_key.is_none());
    }

    #[test]
    fn gemini_key_takes_precedence_over_generic_key() {
        let config = config_from(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "gemini")]).unwrap();
        assert_eq!(config.chat_api_key.as_deref(), Some("gemini"));

        let config = config_from(&[("API_KEY", "generic")]).unwrap();
        assert_eq!(config.chat_api_key.as_deref(), Some("generic"));

        let config = config_from(&[("GEMINI_API_KEY", "  ")]).unwrap();
        assert!(config.chat_api_key.is_none());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config_from(&[("BIND_ADDRESS", "not-an-address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "BIND_ADDRESS"));

        let err = config_from(&[("RUST_LOG", "loud")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "RUST_LOG"));
    }
}
