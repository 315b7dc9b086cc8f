use secrecy::Secret;
use warden_core::{Email, IdentityProvider, Password};

use super::federated::{FederatedAuthError, authenticated_username};

/// Force password change use case - answers a pending new-password challenge
pub struct ForcePasswordChangeUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> ForcePasswordChangeUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    /// Execute the force password change use case
    ///
    /// # Arguments
    /// * `client_id` - App client that issued the challenge
    /// * `email` - Username the challenge was issued for
    /// * `new_password` - Permanent password replacing the temporary one
    /// * `session` - Session handed out with the challenge
    ///
    /// # Returns
    /// The federated username once the provider accepts the new password
    #[tracing::instrument(name = "ForcePasswordChangeUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        client_id: &str,
        email: Email,
        new_password: Password,
        session: Secret<String>,
    ) -> Result<String, FederatedAuthError> {
        let response = self
            .identity_provider
            .respond_to_new_password_challenge(client_id, &email, &new_password, &session)
            .await?;

        authenticated_username(&response)
    }
}
