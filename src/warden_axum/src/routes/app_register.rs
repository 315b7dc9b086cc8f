use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::RegisterUseCase;
use warden_core::{
    Email, NewUser, Password, TokenCodec, UserName, UserStore, UserStoreError, required,
};

use super::LocalAuthState;
use crate::{envelope::ApiResponse, error::ApiError};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn app_register<U, C>(
    State(state): State<LocalAuthState<U, C>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    C: TokenCodec + Clone + 'static,
{
    let Json(request) = payload?;

    let user = NewUser {
        name: UserName::try_from(request.name.unwrap_or_default())?,
        email: Email::try_from(required(request.email, "Email")?)?,
        password: Password::try_from(required(request.password, "Password")?)?,
    };

    match RegisterUseCase::new(&state.user_store).execute(user).await {
        Ok(profile) => Ok(ApiResponse::ok("User created successfully.").with_data(profile)),
        Err(UserStoreError::UserAlreadyExists) => Err(ApiError::validation(
            "The email has already been taken.",
        )),
        Err(UserStoreError::UnexpectedError(e)) => {
            Err(ApiError::internal("Registration failed.", e))
        }
        Err(e) => Err(ApiError::internal("Registration failed.", e)),
    }
}
