//! crates/site_builder_core/src/token.rs
//!
//! Reads the payload segment of the bearer token for display purposes.
//! Nothing here verifies a signature; the backend stays the authority.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Claims the client cares about. Anything else is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Backends issue string or numeric ids; both read as a string.
    #[serde(rename = "userId", default, deserialize_with = "id_as_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(id)) => Some(id),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    })
}

/// Decodes the middle segment of a `header.payload.signature` token.
///
/// Returns `None` for anything that is not base64url-encoded JSON.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("token payload is not base64url: {}", e);
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!("token payload is not JSON: {}", e);
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &Value) -> String {
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", body)
}
