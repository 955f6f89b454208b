//! One inbound webhook request and the response it receives.

use std::collections::HashMap;
use std::fmt;

use axum::Json;
use axum::body::Body;
use axum::response::{IntoResponse, Response};
use http::{HeaderMap, StatusCode};
use serde_json::{Value, json};

use super::WebhookPayload;

/// A response written to an [`Exchange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    /// Status code
    pub status: StatusCode,
    /// JSON body; `None` sends an empty body
    pub body: Option<Value>,
}

impl WebhookResponse {
    /// An empty-bodied response.
    #[must_use]
    pub const fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    /// `204 No Content`.
    #[must_use]
    pub const fn no_content() -> Self {
        Self::empty(StatusCode::NO_CONTENT)
    }

    /// A JSON response.
    #[must_use]
    pub const fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    /// `{"error": message}`.
    #[must_use]
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, json!({ "error": message }))
    }
}

impl IntoResponse for WebhookResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// An inbound request travelling through the webhook adapters.
///
/// Carries the request headers and body, a context of verified payloads
/// keyed by name, a single response slot and a halted flag. The response
/// slot is written at most once: [`Exchange::respond`] on an exchange that
/// already has a response leaves it untouched.
pub struct Exchange {
    headers: HeaderMap,
    body: Option<Body>,
    context: HashMap<String, WebhookPayload>,
    response: Option<WebhookResponse>,
    halted: bool,
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("headers", &self.headers)
            .field("body_read", &self.body.is_none())
            .field("context", &self.context)
            .field("response", &self.response)
            .field("halted", &self.halted)
            .finish()
    }
}

impl Exchange {
    /// Creates an exchange for a request with the given headers and body.
    pub fn new(headers: HeaderMap, body: impl Into<Body>) -> Self {
        Self {
            headers,
            body: Some(body.into()),
            context: HashMap::new(),
            response: None,
            halted: false,
        }
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Takes the request body; later calls get an empty body.
    pub fn take_body(&mut self) -> Body {
        self.body.take().unwrap_or_else(Body::empty)
    }

    /// Stores a payload under `key`.
    pub fn assign(&mut self, key: &str, payload: WebhookPayload) {
        self.context.insert(key.to_string(), payload);
    }

    /// Returns the payload stored under `key`.
    #[must_use]
    pub fn assigned(&self, key: &str) -> Option<&WebhookPayload> {
        self.context.get(key)
    }

    /// Removes and returns the payload stored under `key`.
    pub fn take_assigned(&mut self, key: &str) -> Option<WebhookPayload> {
        self.context.remove(key)
    }

    /// Writes the response unless one was already written.
    ///
    /// Returns `false` when the exchange already had a response.
    pub fn respond(&mut self, response: WebhookResponse) -> bool {
        if self.response.is_some() {
            return false;
        }
        self.response = Some(response);
        true
    }

    /// Returns true once a response has been written.
    #[must_use]
    pub const fn is_responded(&self) -> bool {
        self.response.is_some()
    }

    /// The written response, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&WebhookResponse> {
        self.response.as_ref()
    }

    /// Consumes the exchange, returning the written response.
    #[must_use]
    pub fn finish(self) -> Option<WebhookResponse> {
        self.response
    }

    /// Stops later stages from processing this request.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Returns true if a stage halted processing.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }
}
