use secrecy::Secret;
use warden_core::{Email, IdentityProvider, Password};

use super::federated::FederatedAuthError;

/// Reset password use case - confirms a mailed reset code with a new password
pub struct ResetPasswordUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> ResetPasswordUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        client_id: &str,
        email: Email,
        password: Password,
        code: Secret<String>,
    ) -> Result<(), FederatedAuthError> {
        self.identity_provider
            .confirm_forgot_password(client_id, &email, &password, &code)
            .await?;
        Ok(())
    }
}
