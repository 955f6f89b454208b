//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the binary. All validation is performed during construction.

use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use url::Url;

use crate::api::{BotsQuery, ClientOptions};
use crate::webhook::Verifier;

use super::cli::{Cli, Command};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Resolved settings for the vote receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    /// Socket address to bind
    pub listen: SocketAddr,

    /// Route receiving notifications
    pub path: String,

    /// Expected authorization header value, `None` to accept any request
    pub authorization: Option<String>,

    /// Largest accepted body, in bytes
    pub max_body_bytes: usize,
}

impl WebhookSettings {
    /// Builds the verifier enforcing these settings.
    #[must_use]
    pub fn verifier(&self) -> Verifier {
        Verifier::new(self.authorization.clone()).with_max_body_bytes(self.max_body_bytes)
    }
}

/// Fully validated configuration ready for use by the binary.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Command to run
    pub command: Command,

    /// API token; always present for commands that call the API
    pub token: Option<String>,

    /// Base address of the API
    pub base_url: Url,

    /// Search query for the `bots` command, empty otherwise
    pub query: BotsQuery,

    /// Receiver settings for the `serve` command
    pub webhook: WebhookSettings,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ base_url: {}, token: {}, listen: {}, path: {}, authorization: {}, \
             max_body_bytes: {} }}",
            self.base_url,
            if self.token.is_some() { "set" } else { "none" },
            self.webhook.listen,
            self.webhook.path,
            if self.webhook.authorization.is_some() {
                "set"
            } else {
                "none"
            },
            self.webhook.max_body_bytes,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command calls the API and no token is configured
    /// - The base URL is invalid
    /// - The listen address, webhook path, or body limit is invalid
    /// - A `--search-field` value is not `key=value`
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let token = Self::resolve_token(cli, toml)?;
        let base_url = Self::resolve_base_url(cli, toml)?;
        let query = Self::build_query(&cli.command)?;
        let webhook = Self::resolve_webhook(cli, toml)?;

        Ok(Self {
            command: cli.command.clone(),
            token,
            base_url,
            query,
            webhook,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the platform default location is used when a file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|path| path.is_file()));

        let toml = match path {
            Some(path) => Some(TomlConfig::load(&path)?),
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Client options derived from this configuration.
    #[must_use]
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions::new().with_base_url(self.base_url.clone())
    }

    fn resolve_token(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Option<String>, ConfigError> {
        let token = non_empty(cli.token.as_deref())
            .or_else(|| toml.and_then(|t| non_empty(t.api.token.as_deref())))
            .map(str::to_string);

        if token.is_none() && cli.command.requires_token() {
            return Err(ConfigError::missing(
                field::TOKEN,
                "Use --token or set api.token in config file",
            ));
        }

        Ok(token)
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "cannot be used as a base address".to_string(),
            });
        }

        Ok(url)
    }

    fn build_query(command: &Command) -> Result<BotsQuery, ConfigError> {
        let Command::Bots {
            limit,
            offset,
            search,
            search_fields,
            sort,
            fields,
        } = command
        else {
            return Ok(BotsQuery::new());
        };

        let mut query = BotsQuery::new();
        if let Some(limit) = *limit {
            query = query.with_limit(limit);
        }
        if let Some(offset) = *offset {
            query = query.with_offset(offset);
        }
        if let Some(search) = search {
            query = query.with_search(search.as_str());
        }
        for raw in search_fields {
            let (key, value) = parse_search_field(raw)?;
            query = query.with_search_field(key, value);
        }
        if let Some(sort) = sort {
            query = query.with_sort(sort.as_str());
        }
        if !fields.is_empty() {
            query = query.with_fields(fields.iter().map(String::as_str));
        }

        Ok(query)
    }

    fn resolve_webhook(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<WebhookSettings, ConfigError> {
        let section = toml.map(|t| &t.webhook);
        let (cli_listen, cli_path, cli_authorization) = match &cli.command {
            Command::Serve {
                listen,
                path,
                authorization,
            } => (listen.as_deref(), path.as_deref(), authorization.as_deref()),
            _ => (None, None, None),
        };

        let listen_str = cli_listen
            .or_else(|| section.and_then(|s| s.listen.as_deref()))
            .unwrap_or(defaults::LISTEN_ADDR);
        let listen = listen_str
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidListenAddr {
                value: listen_str.to_string(),
            })?;

        let path = cli_path
            .or_else(|| section.and_then(|s| s.path.as_deref()))
            .unwrap_or(defaults::WEBHOOK_PATH);
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidPath {
                value: path.to_string(),
            });
        }

        // An explicit empty CLI value disables a configured check.
        let authorization = match cli_authorization {
            Some(value) => non_empty(Some(value)),
            None => section.and_then(|s| non_empty(s.authorization.as_deref())),
        }
        .map(str::to_string);

        let max_body_bytes = section
            .and_then(|s| s.max_body_bytes)
            .unwrap_or(defaults::MAX_BODY_BYTES);
        if max_body_bytes == 0 {
            return Err(ConfigError::InvalidBodyLimit);
        }

        Ok(WebhookSettings {
            listen,
            path: path.to_string(),
            authorization,
            max_body_bytes,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Splits a `key=value` search criterion.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSearchField`] if there is no `=` or the key is empty.
pub fn parse_search_field(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidSearchField {
            value: s.to_string(),
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
