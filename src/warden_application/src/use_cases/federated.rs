use warden_core::{
    IdTokenError, IdentityProviderError, InitiateAuthResponse, cognito_username_from_id_token,
};

/// Failure of any identity-provider flow. Provider errors keep the provider's
/// own message.
#[derive(Debug, thiserror::Error)]
pub enum FederatedAuthError {
    #[error(transparent)]
    Provider(#[from] IdentityProviderError),
    #[error(transparent)]
    IdToken(#[from] IdTokenError),
    #[error("Identity provider returned no identity token")]
    MissingIdToken,
    #[error("Identity provider returned no access token")]
    MissingAccessToken,
    #[error("Identity provider returned a challenge without a session")]
    MissingSession,
    #[error("A new password is required before this operation")]
    ChallengePending,
    #[error("Identity provider returned no sub attribute")]
    MissingSubject,
    #[error("Identity provider answered with status {0}")]
    UnexpectedStatus(u16),
}

/// Pull the federated username out of a completed authentication.
pub(crate) fn authenticated_username(
    response: &InitiateAuthResponse,
) -> Result<String, FederatedAuthError> {
    let id_token = response.id_token().ok_or(FederatedAuthError::MissingIdToken)?;
    Ok(cognito_username_from_id_token(id_token)?)
}
