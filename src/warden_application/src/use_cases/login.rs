use warden_core::{
    Email, Password, TokenCodec, TokenCodecError, UserProfile, UserStore, UserStoreError,
};

/// Response from login use case
#[derive(Debug, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub profile: UserProfile,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenCodecError),
}

/// Login use case - checks local credentials and mints a session token
pub struct LoginUseCase<'a, U, C>
where
    U: UserStore,
    C: TokenCodec,
{
    user_store: &'a U,
    token_codec: &'a C,
}

impl<'a, U, C> LoginUseCase<'a, U, C>
where
    U: UserStore,
    C: TokenCodec,
{
    pub fn new(user_store: &'a U, token_codec: &'a C) -> Self {
        Self {
            user_store,
            token_codec,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `password` - User's password
    ///
    /// # Returns
    /// The session token together with the user's public profile. Unknown and
    /// inactive users both fail with `UserStoreError::UserNotFound`.
    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<LoginResponse, LoginError> {
        let user = self.user_store.authenticate_user(&email, &password).await?;

        let token = self.token_codec.mint(user.id(), user.email())?;

        tracing::info!(user_id = %user.id(), "local login succeeded");

        Ok(LoginResponse {
            token,
            profile: user.profile(),
        })
    }
}
