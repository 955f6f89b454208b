//! Callback adapter: verify, then hand the payload to user code.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use http::StatusCode;

use super::{Exchange, HandlerError, Verifier, WebhookPayload, WebhookResponse};

/// Receives errors returned by a listener callback.
pub type ErrorHook = Arc<dyn Fn(&HandlerError) + Send + Sync>;

fn log_error(err: &HandlerError) {
    tracing::error!(error = %err, "Top.gg webhook handler failed");
}

fn panic_error(payload: &(dyn Any + Send)) -> HandlerError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    format!("handler panicked: {message}").into()
}

/// Verification followed by a user callback.
///
/// - Verified: the callback runs; if it wrote no response, `204` is sent.
/// - Callback error or panic: the error goes to the error hook and
///   `500 {"error": "Internal server error"}` is sent.
/// - Rejected: the mapped error response is sent.
///
/// # Example
///
/// ```
/// use topgg::webhook::{Listener, Verifier};
///
/// let listener = Listener::new(Verifier::default(), |vote, _exchange| {
///     println!("{} voted for {}", vote.user, vote.bot);
///     Ok(())
/// });
/// # let _ = listener;
/// ```
pub struct Listener<F> {
    verifier: Verifier,
    handler: F,
    on_error: ErrorHook,
}

impl<F> fmt::Debug for Listener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

impl<F> Listener<F>
where
    F: Fn(WebhookPayload, &mut Exchange) -> Result<(), HandlerError> + Send + Sync,
{
    /// Creates a listener whose callback errors are logged.
    pub fn new(verifier: Verifier, handler: F) -> Self {
        Self {
            verifier,
            handler,
            on_error: Arc::new(log_error),
        }
    }

    /// Routes callback errors to `hook` instead of the log.
    #[must_use]
    pub fn with_error_hook(mut self, hook: impl Fn(&HandlerError) + Send + Sync + 'static) -> Self {
        self.on_error = Arc::new(hook);
        self
    }

    /// Handles one request. Does nothing if the exchange already has a response.
    pub async fn call(&self, exchange: &mut Exchange) {
        if exchange.is_responded() {
            return;
        }

        let body = exchange.take_body();
        let headers = exchange.headers().clone();

        match self.verifier.verify(&headers, body).await {
            Ok(payload) => match self.run_handler(payload, exchange) {
                Ok(()) => {
                    exchange.respond(WebhookResponse::no_content());
                }
                Err(err) => {
                    (self.on_error)(&err);
                    exchange.respond(WebhookResponse::error(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error",
                    ));
                }
            },
            Err(err) => {
                tracing::debug!(error = %err, "Rejected Top.gg webhook");
                exchange.respond(err.to_response());
            }
        }
    }

    /// Runs the callback, turning a panic into a [`HandlerError`].
    fn run_handler(
        &self,
        payload: WebhookPayload,
        exchange: &mut Exchange,
    ) -> Result<(), HandlerError> {
        panic::catch_unwind(AssertUnwindSafe(|| (self.handler)(payload, exchange)))
            .unwrap_or_else(|panic| Err(panic_error(&*panic)))
    }
}
