//! axum integration for the webhook adapters.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::post;

use super::{Exchange, HandlerError, Listener, Middleware, WebhookPayload, WebhookResponse};

/// axum middleware running [`Middleware`].
///
/// A verified payload is inserted into the request extensions, so
/// downstream handlers take it with `Extension<WebhookPayload>`. The body
/// has been consumed by then and handlers see an empty one.
///
/// ```ignore
/// let stage = Arc::new(Middleware::new(Verifier::new(Some(secret))));
/// Router::new()
///     .route("/dblwebhook", post(on_vote))
///     .layer(axum::middleware::from_fn_with_state(stage, verify_vote));
/// ```
pub async fn verify_vote(
    State(middleware): State<Arc<Middleware>>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let mut exchange = Exchange::new(parts.headers.clone(), body);

    middleware.call(&mut exchange).await;

    if exchange.is_halted() || exchange.is_responded() {
        return exchange
            .finish()
            .unwrap_or_else(WebhookResponse::no_content)
            .into_response();
    }

    if let Some(payload) = exchange.take_assigned(middleware.key()) {
        parts.extensions.insert(payload);
    }

    next.run(Request::from_parts(parts, Body::empty())).await
}

/// axum handler running a [`Listener`].
pub async fn listen<F>(State(listener): State<Arc<Listener<F>>>, request: Request) -> Response
where
    F: Fn(WebhookPayload, &mut Exchange) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    let (parts, body) = request.into_parts();
    let mut exchange = Exchange::new(parts.headers, body);

    listener.call(&mut exchange).await;

    exchange
        .finish()
        .unwrap_or_else(WebhookResponse::no_content)
        .into_response()
}

/// Router accepting vote notifications with `POST path`.
pub fn router<F>(path: &str, listener: Listener<F>) -> Router
where
    F: Fn(WebhookPayload, &mut Exchange) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Router::new()
        .route(path, post(listen::<F>))
        .with_state(Arc::new(listener))
}
