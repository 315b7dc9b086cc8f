use warden_core::{Email, IdentityProvider};

/// Forgot password use case - asks the provider to mail a reset code
pub struct ForgotPasswordUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> ForgotPasswordUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    /// Returns whether the provider accepted the request. The provider's
    /// reason for a refusal is logged and not returned.
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, client_id: &str, email: Email) -> bool {
        match self.identity_provider.forgot_password(client_id, &email).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "forgot password request rejected");
                false
            }
        }
    }
}
