use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use warden_core::{
    Email, NewUser, Password, User, UserId, UserStatus, UserStore, UserStoreError,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        if self.users.read().await.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }

        let password_hash = compute_password_hash(user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let mut users = self.users.write().await;
        // Re-checked under the write lock; hashing ran without it.
        if users.contains_key(&user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let stored = User::new(
            UserId::new(),
            user.name,
            user.email.clone(),
            password_hash,
            UserStatus::Active,
        );
        users.insert(user.email, stored.clone());
        Ok(stored)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let user = self
            .users
            .read()
            .await
            .get(email)
            .filter(|user| user.status().is_active())
            .cloned()
            .ok_or(UserStoreError::UserNotFound)?;

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    async fn get_active_user(&self, id: &UserId, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(email)
            .filter(|user| user.id() == id && user.status().is_active())
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|user| user.id() == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.set_status(status);
        Ok(())
    }
}
