use warden_core::{IdentityProvider, PoolClientSpec, PoolCredentials, StoreName, UserPoolSpec};

use super::federated::FederatedAuthError;

/// Create pool use case - provisions a user pool and its app client for a store
pub struct CreatePoolUseCase<'a, P>
where
    P: IdentityProvider,
{
    identity_provider: &'a P,
}

impl<'a, P> CreatePoolUseCase<'a, P>
where
    P: IdentityProvider,
{
    pub fn new(identity_provider: &'a P) -> Self {
        Self { identity_provider }
    }

    /// Provision using the current time in the resource names.
    ///
    /// Retrying after a partial failure creates a fresh pool rather than
    /// reusing the earlier one.
    pub async fn execute(
        &self,
        store_name: StoreName,
        store_id: i64,
    ) -> Result<PoolCredentials, FederatedAuthError> {
        self.provision(store_name, store_id, chrono::Utc::now().timestamp())
            .await
    }

    #[tracing::instrument(name = "CreatePoolUseCase::provision", skip(self, store_name))]
    pub async fn provision(
        &self,
        store_name: StoreName,
        store_id: i64,
        timestamp: i64,
    ) -> Result<PoolCredentials, FederatedAuthError> {
        let pool_spec = UserPoolSpec::for_store(&store_name, store_id, timestamp);
        let pool_id = self.identity_provider.create_user_pool(&pool_spec).await?;

        let client_spec = PoolClientSpec::for_store(&store_name, store_id, timestamp, pool_id.clone());
        let client_id = self
            .identity_provider
            .create_user_pool_client(&client_spec)
            .await?;

        tracing::info!(%pool_id, %client_id, "provisioned user pool");

        Ok(PoolCredentials { pool_id, client_id })
    }
}
