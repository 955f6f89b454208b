//! Receiver for Top.gg vote webhooks.
//!
//! This module provides:
//! - The verification pipeline ([`Verifier`])
//! - Validated payloads ([`WebhookPayload`], [`VoteQuery`])
//! - The request/response model adapters work on ([`Exchange`], [`WebhookResponse`])
//! - A middleware stage ([`Middleware`]) and a callback handler ([`Listener`])
//! - axum wiring for both ([`verify_vote`], [`listen`], [`router`])
//!
//! # Responses
//!
//! | Error | Status |
//! |---|---|
//! | [`WebhookError::Unauthorized`] | 403 |
//! | [`WebhookError::InvalidBody`] | 400 |
//! | [`WebhookError::MalformedRequest`] | 422 |
//! | [`WebhookError::InvalidPayloadFormat`] | 400 |
//! | [`WebhookError::MissingFields`] | 400 |
//! | [`WebhookError::InvalidFieldType`] | 400 |
//!
//! Error bodies are `{"error": "<message>"}`.

mod error;
mod exchange;
mod listener;
mod middleware;
mod payload;
mod service;
mod verifier;


pub use error::{HandlerError, WebhookError};
pub use exchange::{Exchange, WebhookResponse};
pub use listener::{ErrorHook, Listener};
pub use middleware::{DEFAULT_CONTEXT_KEY, Middleware};
pub use payload::{VoteQuery, WebhookPayload};
pub use service::{listen, router, verify_vote};
pub use verifier::{DEFAULT_MAX_BODY_BYTES, Verifier};
