pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    federated::{
        AuthenticationResult, FederatedSession, FederatedUser, InitiateAuthResponse,
        NEW_PASSWORD_REQUIRED, NewFederatedUser, PoolClientSpec, PoolCredentials, PoolRouting,
        ProviderUser, SchemaAttribute, StoreName, UserAttribute, UserPoolSpec,
    },
    id_token::{IdTokenError, IdTokenPayload, cognito_username_from_id_token},
    password::Password,
    session::{AuthenticatedUser, SessionClaims},
    temporary_password::generate_temporary_password,
    user::{NewUser, User, UserError, UserId, UserName, UserProfile, UserStatus, required},
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{IdentityProvider, IdentityProviderError, TokenCodec, TokenCodecError},
};

pub use strategies::auth_validator::AuthValidator;
