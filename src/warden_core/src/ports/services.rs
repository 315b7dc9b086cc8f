use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    email::Email,
    federated::{
        InitiateAuthResponse, NewFederatedUser, PoolClientSpec, PoolRouting, ProviderUser,
        UserPoolSpec,
    },
    password::Password,
    session::SessionClaims,
    user::UserId,
};

#[derive(Debug, Error)]
pub enum TokenCodecError {
    /// Malformed, badly signed and expired tokens all land here.
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Failed to mint token: {0}")]
    Mint(String),
}

/// Signs and verifies local session tokens.
pub trait TokenCodec: Send + Sync {
    /// Mint a token for `user_id`/`email` with the codec's configured TTL.
    fn mint(&self, user_id: &UserId, email: &Email) -> Result<String, TokenCodecError>;

    fn decode(&self, token: &str) -> Result<SessionClaims, TokenCodecError>;
}

#[derive(Debug, Error)]
pub enum IdentityProviderError {
    /// The provider answered with an error document.
    #[error("{message}")]
    Service { kind: String, message: String },
    #[error("Identity provider unreachable: {0}")]
    Transport(String),
    #[error("Identity provider returned an invalid response: {0}")]
    InvalidResponse(String),
    #[error("Failed to sign identity provider request: {0}")]
    Signing(String),
}

/// Port for the managed identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the new pool id.
    async fn create_user_pool(&self, spec: &UserPoolSpec) -> Result<String, IdentityProviderError>;

    /// Returns the new client id.
    async fn create_user_pool_client(
        &self,
        spec: &PoolClientSpec,
    ) -> Result<String, IdentityProviderError>;

    async fn admin_initiate_auth(
        &self,
        routing: &PoolRouting,
        username: &Email,
        password: &Password,
    ) -> Result<InitiateAuthResponse, IdentityProviderError>;

    async fn respond_to_new_password_challenge(
        &self,
        client_id: &str,
        username: &Email,
        new_password: &Password,
        session: &Secret<String>,
    ) -> Result<InitiateAuthResponse, IdentityProviderError>;

    async fn admin_create_user(
        &self,
        user: &NewFederatedUser,
    ) -> Result<ProviderUser, IdentityProviderError>;

    /// Returns the HTTP status the provider answered with.
    async fn change_password(
        &self,
        access_token: &Secret<String>,
        previous_password: &Password,
        proposed_password: &Password,
    ) -> Result<u16, IdentityProviderError>;

    async fn forgot_password(
        &self,
        client_id: &str,
        username: &Email,
    ) -> Result<(), IdentityProviderError>;

    async fn confirm_forgot_password(
        &self,
        client_id: &str,
        username: &Email,
        password: &Password,
        confirmation_code: &Secret<String>,
    ) -> Result<(), IdentityProviderError>;
}
