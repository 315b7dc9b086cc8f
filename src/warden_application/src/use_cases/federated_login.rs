use warden_core::{Email, FederatedSession, IdentityProvider, Password, PoolRouting};

use super::federated::{FederatedAuthError, authenticated_username};

/// Federated login use case - authenticates against the identity provider
pub struct FederatedLoginUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> FederatedLoginUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    /// Execute the federated login use case
    ///
    /// # Returns
    /// `ChallengePending` when the provider demands a new password, otherwise
    /// `Authenticated` with the username read from the identity token.
    #[tracing::instrument(name = "FederatedLoginUseCase::execute", skip_all, fields(client_id = %routing.client_id))]
    pub async fn execute(
        &self,
        routing: &PoolRouting,
        email: Email,
        password: Password,
    ) -> Result<FederatedSession, FederatedAuthError> {
        let response = self
            .identity_provider
            .admin_initiate_auth(routing, &email, &password.trimmed())
            .await?;

        if response.requires_new_password() {
            let cognito_session = response.session.ok_or(FederatedAuthError::MissingSession)?;
            tracing::info!("new password required");
            return Ok(FederatedSession::ChallengePending {
                cognito_session,
                email: email.as_str().to_owned(),
            });
        }

        let cognito_username = authenticated_username(&response)?;
        Ok(FederatedSession::Authenticated { cognito_username })
    }
}
