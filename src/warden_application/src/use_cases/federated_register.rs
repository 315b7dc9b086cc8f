use warden_core::{
    Email, FederatedUser, IdentityProvider, NewFederatedUser, UserAttribute, UserName,
    generate_temporary_password,
};

use super::federated::FederatedAuthError;

const TEMPORARY_PASSWORD_LENGTH: usize = 12;

/// Federated register use case - admin-creates a user in a pool. The provider
/// mails the temporary password to the new user.
pub struct FederatedRegisterUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> FederatedRegisterUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    #[tracing::instrument(name = "FederatedRegisterUseCase::execute", skip_all, fields(pool_id = %pool_id))]
    pub async fn execute(
        &self,
        pool_id: &str,
        name: UserName,
        email: Email,
        email_verified: bool,
    ) -> Result<FederatedUser, FederatedAuthError> {
        let request = NewFederatedUser {
            pool_id: pool_id.to_owned(),
            email: email.clone(),
            temporary_password: generate_temporary_password(TEMPORARY_PASSWORD_LENGTH),
            attributes: vec![
                UserAttribute::new("name", name.as_str()),
                UserAttribute::new("email", email.as_str()),
                UserAttribute::new("email_verified", email_verified.to_string()),
            ],
        };

        let created = self.identity_provider.admin_create_user(&request).await?;

        let cognito_id = created
            .attribute("sub")
            .ok_or(FederatedAuthError::MissingSubject)?
            .to_owned();

        tracing::info!(%cognito_id, "federated user created");

        Ok(FederatedUser {
            name: name.as_str().to_owned(),
            email: email.as_str().to_owned(),
            cognito_username: created.username,
            cognito_id,
        })
    }
}
