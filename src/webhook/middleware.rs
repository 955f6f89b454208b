//! Middleware adapter: verify, then let the request continue.

use super::{Exchange, Verifier};

/// Context key the verified payload is stored under by default.
pub const DEFAULT_CONTEXT_KEY: &str = "topgg_payload";

/// Verification as a pipeline stage.
///
/// On success the payload is stored in the exchange context and
/// processing continues. On failure an `{"error": ...}` response is
/// written and the exchange is halted.
#[derive(Debug, Clone)]
pub struct Middleware {
    verifier: Verifier,
    key: String,
}

impl Middleware {
    /// Creates a middleware storing payloads under [`DEFAULT_CONTEXT_KEY`].
    #[must_use]
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier,
            key: DEFAULT_CONTEXT_KEY.to_string(),
        }
    }

    /// Stores payloads under `key` instead.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The context key payloads are stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Runs the stage. Does nothing if the exchange already has a response.
    pub async fn call(&self, exchange: &mut Exchange) {
        if exchange.is_responded() {
            return;
        }

        let body = exchange.take_body();
        let headers = exchange.headers().clone();

        match self.verifier.verify(&headers, body).await {
            Ok(payload) => {
                tracing::debug!(bot = %payload.bot, user = %payload.user, "Verified Top.gg vote");
                exchange.assign(&self.key, payload);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Rejected Top.gg webhook");
                exchange.respond(err.to_response());
                exchange.halt();
            }
        }
    }
}
