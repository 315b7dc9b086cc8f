use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use warden_core::{
    Email, NewUser, Password, User, UserId, UserStatus, UserStore, UserStoreError,
};

use super::password_hash::{compute_password_hash, verify_password_hash};

type UserRow = (Uuid, String, String, String, String);

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

fn into_user(row: UserRow) -> Result<User, UserStoreError> {
    let (id, name, email, password_hash, status) = row;
    User::parse(
        id,
        name,
        Secret::from(email),
        Secret::from(password_hash),
        &status,
    )
    .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(user.password.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let stored = User::new(
            UserId::new(),
            user.name,
            user.email,
            password_hash,
            UserStatus::Active,
        );

        let query = sqlx::query(
            r#"
                INSERT INTO users (id, name, email, password_hash, status)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(stored.id().as_uuid())
        .bind(stored.name().as_str())
        .bind(stored.email().as_str())
        .bind(stored.password_hash().expose_secret())
        .bind(stored.status().as_str());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(stored)
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, status
                FROM users
                WHERE email = $1 AND status = $2
            "#,
        )
        .bind(email.as_str())
        .bind(UserStatus::Active.as_str());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        let user = into_user(row)?;

        verify_password_hash(user.password_hash().clone(), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Re-checking session user in PostgreSQL", skip_all)]
    async fn get_active_user(&self, id: &UserId, email: &Email) -> Result<User, UserStoreError> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, name, email, password_hash, status
                FROM users
                WHERE id = $1 AND email = $2 AND status = $3
            "#,
        )
        .bind(id.as_uuid())
        .bind(email.as_str())
        .bind(UserStatus::Active.as_str());

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        into_user(row)
    }

    #[tracing::instrument(name = "Updating user status in PostgreSQL", skip(self))]
    async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<(), UserStoreError> {
        let query = sqlx::query(
            r#"
                UPDATE users
                SET status = $1
                WHERE id = $2
            "#,
        )
        .bind(status.as_str())
        .bind(id.as_uuid());

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}
