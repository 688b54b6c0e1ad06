//! Client-side credential decoding
//!
//! The signature is never checked here; the backend owns that. The client only
//! reads the payload to learn the user id and the expiry.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(&'static str),

    #[error("Token payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Token payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Claims the client relies on; anything else in the payload is ignored
///
/// A claim of an unexpected JSON type reads as absent instead of failing the
/// whole decode, so validity only ever depends on `exp`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub exp: Option<f64>, // Seconds since epoch
    #[serde(default, deserialize_with = "lenient")]
    pub role: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl Claims {
    /// Valid iff `exp` is present and `exp * 1000 > now_millis`
    pub fn is_unexpired_at(&self, now: SystemTime) -> bool {
        let now_millis = match now.duration_since(UNIX_EPOCH) {
            Ok(duration) => duration.as_millis() as f64,
            Err(_) => return false,
        };
        match self.exp {
            Some(exp) => exp * 1000.0 > now_millis,
            None => false,
        }
    }
}

/// Decode the payload segment of a `header.payload.signature` token
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or(TokenError::Malformed("missing payload segment"))?;
    if payload.is_empty() {
        return Err(TokenError::Malformed("empty payload segment"));
    }

    // Accept standard-alphabet and padded segments too
    let normalized: String = payload
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(normalized.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Check token validity against the system clock
pub fn is_token_valid(token: Option<&str>) -> bool {
    is_token_valid_at(token, SystemTime::now())
}

/// Check token validity at a given instant; decode failures count as invalid
pub fn is_token_valid_at(token: Option<&str>, now: SystemTime) -> bool {
    let Some(token) = token else {
        return false;
    };
    match decode_claims(token) {
        Ok(claims) => claims.is_unexpired_at(now),
        Err(e) => {
            log::debug!("[Token] Rejecting token: {}", e);
            false
        }
    }
}

/// User id carried by the token, if it decodes
pub fn get_user_id(token: &str) -> Option<u64> {
    match decode_claims(token) {
        Ok(claims) => claims.id,
        Err(e) => {
            log::debug!("[Token] Cannot read user id: {}", e);
            None
        }
    }
}
