//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API client section
    #[serde(default)]
    pub api: ApiSection,

    /// Webhook receiver section
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// Top.gg API token
    pub token: Option<String>,

    /// Base address of the API
    pub base_url: Option<String>,
}

/// Webhook receiver section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Socket address to listen on
    pub listen: Option<String>,

    /// Route receiving notifications
    pub path: Option<String>,

    /// Expected authorization header value
    pub authorization: Option<String>,

    /// Largest accepted body, in bytes
    pub max_body_bytes: Option<usize>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# topgg Configuration File

[api]
# Top.gg API token (required for API commands, can be overridden by --token)
# Find it under your bot's "Webhooks" settings on top.gg
# token = "your-token-here"

# Base address of the API (default: https://top.gg/api)
# base_url = "https://top.gg/api"

[webhook]
# Socket address the `serve` command listens on (default: 0.0.0.0:5000)
# listen = "0.0.0.0:5000"

# Route receiving vote notifications (default: /dblwebhook)
# path = "/dblwebhook"

# Authorization header value configured on top.gg
# Leave unset (or empty) to accept notifications without checking it
# authorization = "your-webhook-secret"

# Largest accepted request body in bytes (default: 8000000)
# max_body_bytes = 8000000
"#
    .to_string()
}
