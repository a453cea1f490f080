use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;

use crate::error::{ClientError, Result};

/// Claims read from an access token issued by the auth service.
#[derive(Debug, Deserialize)]
pub struct AccessTokenClaims {
    /// Organization the token was issued for. Only api-token logins rely on it.
    #[serde(default)]
    pub context_name: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decode access token claims without validation
///
/// The token comes straight back from the token endpoint of the host we are
/// configured against; the signature is not checked here.
pub fn decode_claims(token: &str) -> Result<AccessTokenClaims> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 {
        return Err(ClientError::TokenParse(format!(
            "expected 3 dot-separated segments, found {}",
            parts.len()
        )));
    }

    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| ClientError::TokenParse(format!("failed to decode payload: {}", e)))?;

    serde_json::from_slice(&payload)
        .map_err(|e| ClientError::TokenParse(format!("failed to parse claims: {}", e)))
}
