//! HTTP transport boundary used by the API client.
//!
//! This module provides:
//! - Outbound request values ([`HttpRequest`])
//! - Buffered responses ([`HttpResponse`])
//! - The pluggable transport trait ([`HttpClient`])
//! - The production transport backed by reqwest ([`ReqwestClient`])
//!
//! Connection pooling, keep-alive and TLS are the transport's business;
//! nothing above this module depends on how a request is executed.

mod client;
mod error;
mod request;

#[cfg(test)]
mod request_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
