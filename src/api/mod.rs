//! Top.gg REST API client.
//!
//! This module provides:
//! - The client handle ([`Client`], [`ClientOptions`])
//! - Statistics payloads ([`StatsPayload`], [`ServerCount`], [`Stats`])
//! - Bot search parameters ([`BotsQuery`], [`Search`], [`Fields`])
//! - The error taxonomy ([`ApiError`])
//!
//! Every call is one request/response exchange. There is no caching and
//! no retry; rate limits surface as [`ApiError::Http`] with status 429.

mod bots;
mod client;
mod error;
mod stats;
mod token;

#[cfg(test)]
mod bots_tests;
#[cfg(test)]
mod stats_tests;

pub use bots::{BotsQuery, Fields, Search};
pub use client::{Client, ClientOptions, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use stats::{ServerCount, Stats, StatsPayload};
