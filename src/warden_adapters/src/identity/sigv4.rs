//! AWS Signature Version 4 for JSON-protocol `POST /` calls.
//!
//! Only what the identity provider client sends is covered: a single `POST`
//! to the root path with no query string and four signed headers.
//!
//! Only long-lived IAM access keys are supported. No `X-Amz-Security-Token`
//! is sent, so temporary credentials from STS or an assumed role will be
//! rejected by the service.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use warden_core::IdentityProviderError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "content-type;host;x-amz-date;x-amz-target";

/// A long-lived access key pair. Session tokens are not supported.
pub struct Credentials<'a> {
    pub access_key_id: &'a Secret<String>,
    pub secret_access_key: &'a Secret<String>,
}

/// Request facts that go into the signature.
pub struct SignableRequest<'a> {
    pub host: &'a str,
    pub content_type: &'a str,
    pub target: &'a str,
    pub payload: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

pub fn sign(
    credentials: &Credentials<'_>,
    region: &str,
    service: &str,
    request: &SignableRequest<'_>,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, IdentityProviderError> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();
    let scope = format!("{date}/{region}/{service}/aws4_request");

    let canonical_request = format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\nx-amz-date:{amz_date}\nx-amz-target:{}\n\n{SIGNED_HEADERS}\n{}",
        request.content_type,
        request.host,
        request.target,
        hex::encode(Sha256::digest(request.payload)),
    );

    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(credentials.secret_access_key, &date, region, service)?;
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        amz_date,
        authorization: format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            credentials.access_key_id.expose_secret()
        ),
    })
}

pub fn signing_key(
    secret_access_key: &Secret<String>,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, IdentityProviderError> {
    let secret = format!("AWS4{}", secret_access_key.expose_secret());
    let date_key = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
    let region_key = hmac_sha256(&date_key, region.as_bytes())?;
    let service_key = hmac_sha256(&region_key, service.as_bytes())?;
    hmac_sha256(&service_key, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, IdentityProviderError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| IdentityProviderError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
