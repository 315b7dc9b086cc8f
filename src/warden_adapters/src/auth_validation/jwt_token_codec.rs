use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use warden_core::{Email, SessionClaims, TokenCodec, TokenCodecError, UserId};

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 session tokens signed with the server secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    config: JwtAuthConfig,
}

impl JwtTokenCodec {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn mint(&self, user_id: &UserId, email: &Email) -> Result<String, TokenCodecError> {
        generate_session_token(
            user_id,
            email,
            self.config.token_ttl_in_seconds,
            self.config.as_bytes(),
        )
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, TokenCodecError> {
        validate_session_token(token, self.config.as_bytes())
    }
}

// Create JWT session token
pub fn generate_session_token(
    user_id: &UserId,
    email: &Email,
    token_ttl_seconds: i64,
    secret: &[u8],
) -> Result<String, TokenCodecError> {
    let delta = chrono::Duration::try_seconds(token_ttl_seconds).ok_or(TokenCodecError::Mint(
        "Failed to create session token duration".to_string(),
    ))?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenCodecError::Mint("Duration out of range".to_string()))?
        .timestamp();

    let claims = SessionClaims {
        user_id: *user_id,
        email: email.as_str().to_owned(),
        iat: now.timestamp(),
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenCodecError::Mint(e.to_string()))
}

// Every decode failure collapses into InvalidToken; expiry has no leeway.
pub fn validate_session_token(token: &str, secret: &[u8]) -> Result<SessionClaims, TokenCodecError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            TokenCodecError::InvalidToken
        })
}
