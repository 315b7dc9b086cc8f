use warden_core::{NewUser, UserProfile, UserStore, UserStoreError};

/// Register use case - creates a local user
pub struct RegisterUseCase<'a, U>
where
    U: UserStore,
{
    user_store: &'a U,
}

impl<'a, U> RegisterUseCase<'a, U>
where
    U: UserStore,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `user` - Validated name, email and password
    ///
    /// # Returns
    /// The stored user's public profile, or UserStoreError if the email is
    /// taken or the store fails
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, user: NewUser) -> Result<UserProfile, UserStoreError> {
        let user = self.user_store.add_user(user).await?;
        Ok(user.profile())
    }
}
