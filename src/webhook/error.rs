//! Error types for webhook verification and handling.

use http::StatusCode;
use thiserror::Error;

use super::WebhookResponse;

/// Why an inbound vote notification was rejected.
///
/// Every variant is derived from the request itself, so retrying the same
/// request yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// The authorization header is absent, repeated, or wrong.
    #[error("Unauthorized")]
    Unauthorized,

    /// The body is not valid JSON.
    #[error("Invalid JSON body")]
    InvalidBody,

    /// The body could not be read completely.
    #[error("Malformed request")]
    MalformedRequest,

    /// The body is JSON but not an object.
    #[error("Invalid payload format")]
    InvalidPayloadFormat,

    /// Required keys are absent, listed in `bot, user, type` order.
    #[error("Missing required fields: {}", .fields.join(", "))]
    MissingFields {
        /// Names of the missing keys
        fields: Vec<&'static str>,
    },

    /// A known key is present with the wrong JSON type.
    #[error("Invalid type for field: {field}")]
    InvalidFieldType {
        /// Name of the first offending key
        field: &'static str,
    },
}

impl WebhookError {
    /// HTTP status sent back to Top.gg for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::MalformedRequest => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidBody
            | Self::InvalidPayloadFormat
            | Self::MissingFields { .. }
            | Self::InvalidFieldType { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// `{"error": <message>}` with [`status`](Self::status).
    #[must_use]
    pub fn to_response(&self) -> WebhookResponse {
        WebhookResponse::error(self.status(), &self.to_string())
    }
}

/// Error returned by a [`Listener`](super::Listener) callback.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
