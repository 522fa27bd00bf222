//! services/gateway/src/config.rs
//!
//! Defines the gateway's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Every variable has a default.

use std::net::SocketAddr;
use tracing::Level;
use url::Url;

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
    /// Base URL of the external backend every proxy route forwards to.
    pub api_base_url: Url,
    pub log_level: Level,
    pub allowed_origin: String,
    pub app_name: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let api_base_url = parse_base_url(
            &std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),
        )?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin = std::env::var("ALLOWED_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        let app_name = std::env::var("APP_NAME").unwrap_or_else(|_| "Site Builder".to_string());

        Ok(Self {
            bind_address,
            api_base_url,
            log_level,
            allowed_origin,
            app_name,
        })
    }

    /// Configuration pointing at `api_base_url` with every other value defaulted.
    pub fn for_backend(api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 0)),
            api_base_url: parse_base_url(api_base_url)?,
            log_level: Level::INFO,
            allowed_origin: "http://localhost:3000".to_string(),
            app_name: "Site Builder".to_string(),
        })
    }
}

/// Accepts absolute http(s) URLs only.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidValue("API_BASE_URL".to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidValue(
            "API_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", other),
        )),
    }
}
