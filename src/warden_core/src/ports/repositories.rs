use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::Password,
    user::{NewUser, User, UserId, UserStatus},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Local credential store.
///
/// Lookups used for authentication only ever see `active` users; an inactive
/// user is indistinguishable from a missing one.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Hash the password and persist the user as `active`.
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError>;

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;

    /// Find the active user matching both `id` and `email`.
    async fn get_active_user(&self, id: &UserId, email: &Email) -> Result<User, UserStoreError>;

    async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<(), UserStoreError>;
}
