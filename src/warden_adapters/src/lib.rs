pub mod auth_validation;
pub mod config;
pub mod identity;
pub mod persistence;

pub use auth_validation::{
    bearer_token_validator::{BearerTokenValidator, TokenAuthError},
    jwt_token_codec::{JwtAuthConfig, JwtTokenCodec},
};
pub use identity::cognito_client::CognitoClient;
pub use persistence::{hashmap_user_store::HashMapUserStore, postgres_user_store::PostgresUserStore};
