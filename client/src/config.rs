//! Configuration management for the Expirapp client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with EXPIRAPP prefix
//!
//! Earlier clients hardcoded the backend base URL (with inconsistent hosts,
//! ports and trailing slashes) in every page; here it is a single value.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Backend API configuration
    pub api: ApiConfig,

    /// Local session persistence configuration
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the version prefix
    pub base_url: String,

    /// Base URL for relative asset paths (product images)
    pub asset_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Path of the JSON file holding the persisted session
    pub path: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment =
            std::env::var("EXPIRAPP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:8081/api/v1")?
            .set_default("api.asset_base_url", "http://localhost:8081")?
            .set_default("session.path", ".expirapp/session.json")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (EXPIRAPP prefix)
            .add_source(
                Environment::with_prefix("EXPIRAPP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            api: ApiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081/api/v1".to_string(),
            asset_base_url: "http://localhost:8081".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: ".expirapp/session.json".to_string(),
        }
    }
}
