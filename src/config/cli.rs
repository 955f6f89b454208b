//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// topgg: Top.gg API client and vote webhook receiver
///
/// Queries bot statistics and votes from the Top.gg API, posts server
/// counts, and hosts an endpoint receiving vote notifications.
#[derive(Debug, Parser)]
#[command(name = "topgg")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Top.gg API token (required for API commands)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Base address of the Top.gg API
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for topgg
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "topgg.toml")]
        output: PathBuf,
    },

    /// Show the statistics recorded for your bot
    Stats,

    /// Post your bot's server count
    PostStats {
        /// Total server count, or one count per shard separated by commas
        #[arg(long = "server-count", required = true, value_delimiter = ',')]
        server_count: Vec<i64>,

        /// Number of shards
        #[arg(long = "shard-count")]
        shard_count: Option<u64>,

        /// Shard posting these stats
        #[arg(long = "shard-id")]
        shard_id: Option<u64>,
    },

    /// Look up a bot by id
    Bot {
        /// Bot id
        id: String,
    },

    /// Look up a user by id (deprecated by the API)
    User {
        /// User id
        id: String,
    },

    /// Search bots
    Bots {
        /// Maximum number of results
        #[arg(long)]
        limit: Option<u32>,

        /// Number of results to skip
        #[arg(long)]
        offset: Option<u32>,

        /// Free-text search
        #[arg(long, conflicts_with = "search_fields")]
        search: Option<String>,

        /// Field search in 'key=value' form (can be specified multiple times)
        #[arg(long = "search-field", value_name = "K=V")]
        search_fields: Vec<String>,

        /// Sort field
        #[arg(long)]
        sort: Option<String>,

        /// Field to include in results (can be specified multiple times)
        #[arg(long = "field", value_name = "NAME")]
        fields: Vec<String>,
    },

    /// List the latest votes for your bot
    Votes {
        /// Page number (default: 1)
        #[arg(long)]
        page: Option<u32>,
    },

    /// Check whether a user has voted in the last 12 hours
    Voted {
        /// User id
        user_id: String,
    },

    /// Check whether the weekend vote multiplier is active
    Weekend,

    /// Receive vote notifications over HTTP
    Serve {
        /// Socket address to listen on
        #[arg(long)]
        listen: Option<String>,

        /// Route receiving notifications
        #[arg(long)]
        path: Option<String>,

        /// Expected authorization header value
        #[arg(long)]
        authorization: Option<String>,
    },
}

impl Command {
    /// Returns true for commands that call the Top.gg API.
    #[must_use]
    pub const fn requires_token(&self) -> bool {
        !matches!(self, Self::Init { .. } | Self::Serve { .. })
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
