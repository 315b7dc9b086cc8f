use async_trait::async_trait;
use http::{HeaderMap, header::AUTHORIZATION};
use secrecy::Secret;
use thiserror::Error;
use warden_core::{AuthValidator, AuthenticatedUser, Email, TokenCodec, UserStore};

const BEARER_PREFIX: &str = "Bearer";

/// Guards protected routes: decodes the bearer token, then re-checks that the
/// user it names still exists and is active.
#[derive(Clone)]
pub struct BearerTokenValidator<U, C> {
    user_store: U,
    token_codec: C,
}

impl<U, C> BearerTokenValidator<U, C> {
    pub fn new(user_store: U, token_codec: C) -> Self {
        Self {
            user_store,
            token_codec,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenAuthError {
    #[error("No token")]
    MissingToken,
    #[error("Invalid or Expired Token")]
    InvalidToken,
    #[error("Invalid Access")]
    InvalidAccess,
}

#[async_trait]
impl<U, C> AuthValidator for BearerTokenValidator<U, C>
where
    U: UserStore + Clone + 'static,
    C: TokenCodec + Clone + 'static,
{
    type Claims = AuthenticatedUser;
    type RequestParts = http::request::Parts;
    type Error = TokenAuthError;

    #[tracing::instrument(name = "BearerTokenValidator::validate", skip_all)]
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Claims, Self::Error> {
        let token = extract_token(&parts.headers)?;

        let claims = self
            .token_codec
            .decode(token)
            .map_err(|_| TokenAuthError::InvalidToken)?;

        let email = Email::try_from(Secret::from(claims.email))
            .map_err(|_| TokenAuthError::InvalidAccess)?;

        // A store failure is treated like a missing user.
        let user = self
            .user_store
            .get_active_user(&claims.user_id, &email)
            .await
            .map_err(|e| {
                tracing::info!(user_id = %claims.user_id, error = %e, "session user re-check failed");
                TokenAuthError::InvalidAccess
            })?;

        Ok(AuthenticatedUser::from(&user))
    }
}

/// Pull the raw token out of the `Authorization` header. A case-sensitive
/// `Bearer` prefix is optional.
pub fn extract_token(headers: &HeaderMap) -> Result<&str, TokenAuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?
        .to_str()
        .map_err(|_| TokenAuthError::InvalidToken)?;

    if value.trim().is_empty() {
        return Err(TokenAuthError::MissingToken);
    }

    Ok(value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
}
