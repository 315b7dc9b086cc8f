//! Per-request provider routing read from custom headers.

use axum::http::HeaderMap;
use warden_core::PoolRouting;

use crate::error::ApiError;

pub const CLIENT_ID_HEADER: &str = "aws_client_id";
pub const POOL_ID_HEADER: &str = "aws_cognito_pool_id";

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, ApiError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::validation(format!("Missing {name} header.")))
}

pub fn client_id(headers: &HeaderMap) -> Result<String, ApiError> {
    required_header(headers, CLIENT_ID_HEADER)
}

pub fn pool_id(headers: &HeaderMap) -> Result<String, ApiError> {
    required_header(headers, POOL_ID_HEADER)
}

pub fn pool_routing(headers: &HeaderMap) -> Result<PoolRouting, ApiError> {
    Ok(PoolRouting {
        client_id: client_id(headers)?,
        pool_id: pool_id(headers)?,
    })
}
