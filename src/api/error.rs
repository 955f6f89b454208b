//! Error type for API client operations.

use http::StatusCode;
use thiserror::Error;

use crate::transport::HttpError;

/// Error type for [`Client`](super::Client) construction and calls.
///
/// Precondition failures (`MissingOrInvalidServerCount`, `IdMissing`,
/// `MissingId`) are raised before any request leaves the process.
/// Nothing here is retried internally.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The token is not three period-separated segments, or cannot be
    /// carried in an HTTP header.
    #[error("Malformed token: expected three period-separated segments")]
    MalformedToken,

    /// The token is segment-shaped but its middle segment is not
    /// URL-safe base64 encoded JSON.
    #[error("Invalid token state: payload segment is not base64-encoded JSON")]
    InvalidTokenState,

    /// `server_count` is absent, not an integer, not positive, or an empty list.
    #[error(
        "Missing or invalid server_count: expected a positive integer or a non-empty list of integers"
    )]
    MissingOrInvalidServerCount,

    /// A bot or user lookup was called with an empty id.
    #[error("An id is required")]
    IdMissing,

    /// A vote check was called with an empty user id.
    #[error("A user id is required to check votes")]
    MissingId,

    /// The API answered with a non-2xx status.
    #[error("Top.gg API returned {status}: {body}")]
    Http {
        /// Response status
        status: StatusCode,
        /// Raw response body
        body: String,
    },

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// No response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The endpoint URL could not be built from the configured base address.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A 2xx response lacked a field the operation needs.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Returns the HTTP status for [`ApiError::Http`] errors.
    ///
    /// Callers implementing their own backoff can match on
    /// `StatusCode::TOO_MANY_REQUESTS` here.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
