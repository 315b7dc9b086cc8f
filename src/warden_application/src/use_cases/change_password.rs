use secrecy::Secret;
use warden_core::{Email, IdentityProvider, Password, PoolRouting};

use super::federated::FederatedAuthError;

const HTTP_OK: u16 = 200;

/// Change password use case - re-authenticates, then swaps the password using
/// the fresh access token
pub struct ChangePasswordUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> ChangePasswordUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    /// Execute the change password use case
    ///
    /// # Arguments
    /// * `routing` - Pool and app client the user belongs to
    /// * `email` - User's email address
    /// * `current_password` - Password used to re-authenticate
    /// * `new_password` - Replacement password
    ///
    /// # Returns
    /// Ok(()) only when the provider answered the change with HTTP 200. A user
    /// still holding a temporary password gets `ChallengePending`.
    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        routing: &PoolRouting,
        email: Email,
        current_password: Password,
        new_password: Password,
    ) -> Result<(), FederatedAuthError> {
        let response = self
            .identity_provider
            .admin_initiate_auth(routing, &email, &current_password)
            .await?;

        if response.requires_new_password() {
            return Err(FederatedAuthError::ChallengePending);
        }

        let access_token = response
            .access_token()
            .map(|token| Secret::from(token.to_owned()))
            .ok_or(FederatedAuthError::MissingAccessToken)?;

        let status = self
            .identity_provider
            .change_password(&access_token, &current_password, &new_password)
            .await?;

        if status != HTTP_OK {
            return Err(FederatedAuthError::UnexpectedStatus(status));
        }

        Ok(())
    }
}
