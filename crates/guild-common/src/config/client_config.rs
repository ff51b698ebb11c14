//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use guild_core::Snowflake;
use serde::Deserialize;
use std::env;
use std::fmt;

/// Main client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub app: AppSettings,
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Remote API settings used by the HTTP transport
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Passed through verbatim as the `Authorization` header
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// The identity the client acts as
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    pub self_id: Snowflake,
}

/// Entity overlay behaviour
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheConfig {
    /// Write the empty `game`/`activities` default back into the raw store on first read
    #[serde(default)]
    pub materialize_activity_defaults: bool,
}

// Default value functions
fn default_app_name() -> String {
    "guild-client".to_string()
}

fn default_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let self_id = lookup("GUILD_SELF_ID").ok_or(ConfigError::MissingVar("GUILD_SELF_ID"))?;
        let self_id = Snowflake::parse(self_id.trim())
            .map_err(|_| ConfigError::InvalidValue("GUILD_SELF_ID", self_id.clone()))?;

        let request_timeout_secs = match lookup("GUILD_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GUILD_REQUEST_TIMEOUT_SECS", raw.clone()))?,
            None => default_request_timeout(),
        };

        let materialize_activity_defaults = match lookup("GUILD_MATERIALIZE_ACTIVITY_DEFAULTS") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue(
                "GUILD_MATERIALIZE_ACTIVITY_DEFAULTS",
                raw.clone(),
            ))?,
            None => false,
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .as_deref()
                    .and_then(Environment::parse)
                    .unwrap_or_default(),
            },
            api: ApiConfig {
                base_url: lookup("GUILD_API_BASE_URL")
                    .map(|s| s.trim_end_matches('/').to_string())
                    .unwrap_or_else(default_base_url),
                token: lookup("GUILD_API_TOKEN").filter(|t| !t.is_empty()),
                request_timeout_secs,
            },
            identity: IdentityConfig { self_id },
            cache: CacheConfig {
                materialize_activity_defaults,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
