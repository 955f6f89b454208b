//! Configuration layer for the `topgg` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`], [`WebhookSettings`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from `--config`, or `topgg.toml` in the
//!    platform config directory when it exists
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The API token has no default. Commands that call the API fail with
//! [`ConfigError::MissingRequired`] when neither `--token` nor `api.token`
//! provides one; `init` and `serve` never need it.
//!
//! # Empty Values
//!
//! An empty `token` or `authorization` counts as unset. An empty
//! authorization therefore disables the header check on the receiver.
//!
//! # TOML-Only Options
//!
//! `webhook.max_body_bytes` (default: 8 000 000) has no CLI flag.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, TomlConfig, WebhookSection, default_config_template};
pub use validated::{ValidatedConfig, WebhookSettings, parse_search_field, write_default_config};
