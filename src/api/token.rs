//! Construction-time token shape check.
//!
//! Top.gg tokens are JWTs. The check here only sniffs the format: three
//! segments, with a middle segment that decodes to JSON. The signature is
//! never verified and the claims are never read, so a forged token with
//! the right shape passes. That is a known limitation, kept so that
//! construction accepts and rejects exactly the same tokens as other
//! Top.gg client libraries; authentication happens server-side.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use super::ApiError;

/// Checks that `token` looks like a JWT.
///
/// # Errors
///
/// - [`ApiError::MalformedToken`] unless there are exactly three segments
/// - [`ApiError::InvalidTokenState`] if the middle segment is not
///   unpadded URL-safe base64 of a JSON document
pub fn check_shape(token: &str) -> Result<(), ApiError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(ApiError::MalformedToken);
    };

    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ApiError::InvalidTokenState)?;

    serde_json::from_slice::<serde_json::Value>(&decoded)
        .map(|_| ())
        .map_err(|_| ApiError::InvalidTokenState)
}
