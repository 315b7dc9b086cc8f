//! Axum route handlers.
//!
//! `/app/*` routes work against the local user store; `/cognito*` routes
//! forward to the identity provider and sit behind [`crate::require_auth`].

pub mod app_login;
pub mod app_register;
pub mod change_password;
pub mod cognito_login;
pub mod cognito_register;
pub mod create_pool;
pub mod force_password_change;
pub mod forgot_password;
pub mod index;
pub mod reset_password;

pub use app_login::app_login;
pub use app_register::app_register;
pub use change_password::change_password;
pub use cognito_login::cognito_login;
pub use cognito_register::cognito_register;
pub use create_pool::create_pool;
pub use force_password_change::force_password_change;
pub use forgot_password::forgot_password;
pub use index::index;
pub use reset_password::reset_password;

use crate::error::ApiError;

/// State for the local email/password routes.
#[derive(Clone)]
pub struct LocalAuthState<U, C> {
    pub user_store: U,
    pub token_codec: C,
}

const INVALID_REQUEST_DATA: &str = "Invalid request data.";

fn invalid_request_data<E>(_: E) -> ApiError {
    ApiError::validation(INVALID_REQUEST_DATA)
}
