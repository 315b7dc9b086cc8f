use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdTokenError {
    #[error("Identity token has no payload segment")]
    MissingPayload,
    #[error("Identity token payload is not base64: {0}")]
    InvalidEncoding(String),
    #[error("Identity token payload is not JSON: {0}")]
    InvalidJson(String),
    #[error("Identity token carries no cognito:username claim")]
    MissingUsername,
}

/// The subset of identity-token claims this service reads.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenPayload {
    #[serde(rename = "cognito:username")]
    pub cognito_username: Option<String>,
    pub sub: Option<String>,
    pub email: Option<String>,
}

impl IdTokenPayload {
    /// Reads the payload segment without checking the signature; the token
    /// was just handed to us by the provider over TLS.
    pub fn from_token(id_token: &str) -> Result<Self, IdTokenError> {
        let segment = id_token
            .split('.')
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .ok_or(IdTokenError::MissingPayload)?;

        let bytes = URL_SAFE_NO_PAD
            .decode(segment.trim_end_matches('='))
            .map_err(|e| IdTokenError::InvalidEncoding(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| IdTokenError::InvalidJson(e.to_string()))
    }
}

pub fn cognito_username_from_id_token(id_token: &str) -> Result<String, IdTokenError> {
    IdTokenPayload::from_token(id_token)?
        .cognito_username
        .ok_or(IdTokenError::MissingUsername)
}
