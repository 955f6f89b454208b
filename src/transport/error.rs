//! Error type for the transport boundary.

use thiserror::Error;

/// A request that produced no HTTP response at all.
///
/// Non-2xx responses are not errors at this layer; they come back as
/// an [`HttpResponse`](super::HttpResponse) and are classified by the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused connection, TLS, reset).
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not answer within the transport's timeout.
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built from the given URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
