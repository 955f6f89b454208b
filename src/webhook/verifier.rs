//! The verification pipeline.
//!
//! Four stages run in order and stop at the first failure:
//! authorize → read body → parse JSON → validate and shape.

use axum::body::{Body, Bytes};
use http::HeaderMap;
use http::header::AUTHORIZATION;

use super::{WebhookError, WebhookPayload};

/// Largest body read before the request counts as malformed.
pub const DEFAULT_MAX_BODY_BYTES: usize = 8_000_000;

/// Verifies inbound vote notifications.
///
/// Holds only configuration, so one verifier can serve any number of
/// concurrent requests.
///
/// # Example
///
/// ```
/// use topgg::webhook::Verifier;
///
/// let verifier = Verifier::new(Some("my-webhook-secret".to_string()));
/// let payload = Verifier::parse_payload(br#"{"bot":"1","user":"2","type":"test"}"#).unwrap();
/// assert!(payload.is_test());
/// # let _ = verifier;
/// ```
#[derive(Debug, Clone)]
pub struct Verifier {
    authorization: Option<String>,
    max_body_bytes: usize,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Verifier {
    /// Creates a verifier expecting `authorization` as the header value.
    ///
    /// With `None` every request passes the authorization stage.
    #[must_use]
    pub const fn new(authorization: Option<String>) -> Self {
        Self {
            authorization,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the body size limit.
    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Returns the body size limit.
    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Runs the whole pipeline.
    ///
    /// # Errors
    ///
    /// The [`WebhookError`] of the first failing stage.
    pub async fn verify(
        &self,
        headers: &HeaderMap,
        body: Body,
    ) -> Result<WebhookPayload, WebhookError> {
        self.authorize(headers)?;
        let bytes = self.read_body(body).await?;
        Self::parse_payload(&bytes)
    }

    /// Checks the authorization header.
    ///
    /// Exactly one header must be present and equal to the configured
    /// secret byte for byte.
    ///
    /// # Errors
    ///
    /// [`WebhookError::Unauthorized`] if the header is absent, repeated or
    /// different.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), WebhookError> {
        let Some(expected) = &self.authorization else {
            return Ok(());
        };

        let mut values = headers.get_all(AUTHORIZATION).iter();
        match (values.next(), values.next()) {
            (Some(value), None) if value.as_bytes() == expected.as_bytes() => Ok(()),
            _ => Err(WebhookError::Unauthorized),
        }
    }

    /// Buffers the body up to the configured limit.
    ///
    /// # Errors
    ///
    /// [`WebhookError::MalformedRequest`] if the body is larger than the
    /// limit or the stream fails midway.
    pub async fn read_body(&self, body: Body) -> Result<Bytes, WebhookError> {
        axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|_| WebhookError::MalformedRequest)
    }

    /// Parses and validates a buffered body.
    ///
    /// # Errors
    ///
    /// [`WebhookError::InvalidBody`] for invalid JSON, otherwise the
    /// validation errors of [`WebhookPayload::from_value`].
    pub fn parse_payload(body: &[u8]) -> Result<WebhookPayload, WebhookError> {
        let value = serde_json::from_slice(body).map_err(|_| WebhookError::InvalidBody)?;
        WebhookPayload::from_value(value)
    }
}
