//! topgg: Top.gg API client and vote webhook receiver
//!
//! A library for talking to the Top.gg bot-listing API and for
//! verifying the vote notifications Top.gg posts to a bot's webhook.
//!
//! - [`api`]: typed client for the REST API
//! - [`transport`]: pluggable HTTP transport used by the client
//! - [`webhook`]: verification pipeline with framework adapters
//! - [`config`]: configuration layer of the `topgg` binary

pub mod api;
pub mod config;
pub mod transport;
pub mod webhook;
