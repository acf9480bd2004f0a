//! Token payload decoding for ownership checks.
//!
//! Nothing here verifies signatures. The result only decides which controls
//! a view offers; the backend still authorizes every request.

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use tracing::debug;

use crate::models::TokenClaims;

/// Decodes the payload segment of a three-part token.
///
/// Returns `None` for anything that is not `header.payload.signature` with a
/// base64 JSON object in the middle.
#[must_use]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => {
            debug!("token is not a three-segment JWT");
            return None;
        }
    };

    let trimmed = payload.trim_end_matches('=');
    let bytes = match URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
    {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(error = %err, "token payload is not base64");
            return None;
        }
    };

    match serde_json::from_slice::<TokenClaims>(&bytes) {
        Ok(claims) => Some(claims),
        Err(err) => {
            debug!(error = %err, "token payload is not a claims object");
            None
        }
    }
}

/// Numeric user id the token was issued to.
#[must_use]
pub fn decode_subject(token: &str) -> Option<i64> {
    decode_claims(token).and_then(|claims| claims.subject_id())
}

/// Whether the token holder owns a record belonging to `owner_id`.
///
/// Any missing piece answers `false`.
#[must_use]
pub fn is_owner(token: Option<&str>, owner_id: Option<i64>) -> bool {
    match (token.and_then(decode_subject), owner_id) {
        (Some(subject), Some(owner)) => subject == owner,
        _ => false,
    }
}
