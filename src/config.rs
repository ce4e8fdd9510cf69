// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// WHOOP OAuth client ID (public)
    pub whoop_client_id: String,
    /// WHOOP OAuth client secret
    pub whoop_client_secret: String,
    /// Redirect URI registered with WHOOP for the authorization-code flow
    pub whoop_redirect_uri: String,
    /// Base URL for all WHOOP endpoints (authorization, token, developer API)
    pub whoop_base_url: String,
    /// Frontend origin allowed by CORS. CORS is disabled when unset.
    pub frontend_origin: Option<String>,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            whoop_client_id: env::var("WHOOP_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("WHOOP_CLIENT_ID"))?,
            whoop_client_secret: env::var("WHOOP_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("WHOOP_CLIENT_SECRET"))?,
            whoop_redirect_uri: env::var("WHOOP_REDIRECT_URI")
                .map_err(|_| ConfigError::Missing("WHOOP_REDIRECT_URI"))?,
            whoop_base_url: env::var("WHOOP_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.prod.whoop.com".to_string()),
            frontend_origin: env::var("FRONTEND_ORIGIN").ok(),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            whoop_client_id: "test_client_id".to_string(),
            whoop_client_secret: "test_secret".to_string(),
            whoop_redirect_uri: "http://localhost:8080/callback".to_string(),
            whoop_base_url: "https://api.prod.whoop.com".to_string(),
            frontend_origin: None,
            port: 8080,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
