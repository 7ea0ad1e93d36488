use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Result, TourneyError};
use crate::model::Claims;

/// Decode the payload of a session JWT without verifying its signature.
///
/// Signature checks belong to the API; clients only read claims to decide
/// whether a stored session is still usable.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TourneyError::MalformedToken {
            reason: "expected three dot-separated segments",
        });
    };
    if payload.is_empty() {
        return Err(TourneyError::MalformedToken {
            reason: "empty payload segment",
        });
    }

    let bytes = base64::decode_config(payload.trim_end_matches('='), base64::URL_SAFE_NO_PAD)?;
    serde_json::from_slice(&bytes).map_err(|e| TourneyError::Json {
        context: "token payload".to_owned(),
        source: e,
    })
}

/// Whether a stored token should be treated as logged out at `now`.
///
/// Undecodable tokens and tokens without an `exp` claim count as expired.
pub fn is_token_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(Claims { exp: Some(exp), .. }) => exp <= now.timestamp(),
        Ok(_) => true,
        Err(e) => {
            debug!(error = %e, "treating undecodable token as expired");
            true
        }
    }
}
