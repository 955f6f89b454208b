//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use std::path::PathBuf;

/// Default base address of the Top.gg API.
pub const BASE_URL: &str = crate::api::DEFAULT_BASE_URL;

/// Default socket address for the webhook receiver.
pub const LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Default route receiving vote notifications.
pub const WEBHOOK_PATH: &str = "/dblwebhook";

/// Default limit on webhook request bodies, in bytes.
pub const MAX_BODY_BYTES: usize = crate::webhook::DEFAULT_MAX_BODY_BYTES;

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "topgg.toml";

/// Platform location of the configuration file, e.g.
/// `~/.config/topgg/topgg.toml` on Linux.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("topgg").join(CONFIG_FILE_NAME))
}
