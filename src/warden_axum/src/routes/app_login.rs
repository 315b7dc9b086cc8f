use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use warden_application::LoginUseCase;
use warden_core::{Email, Password, TokenCodec, UserStore, required};

use super::LocalAuthState;
use crate::{envelope::ApiResponse, error::ApiError};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[derive(Serialize)]
struct LoginData<'a> {
    email: &'a str,
    name: &'a str,
    token: &'a str,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn app_login<U, C>(
    State(state): State<LocalAuthState<U, C>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    C: TokenCodec + Clone + 'static,
{
    let Json(request) = payload?;

    let email = required(request.email, "Email")?;
    let password = Password::try_from(required(request.password, "Password")?)?;
    // A malformed address can never match a stored user.
    let email =
        Email::try_from(email).map_err(|_| ApiError::NotFound("User not found".to_owned()))?;

    let response = LoginUseCase::new(&state.user_store, &state.token_codec)
        .execute(email, password)
        .await?;

    Ok(ApiResponse::ok("Login Successfully").with_data(LoginData {
        email: &response.profile.email,
        name: &response.profile.name,
        token: &response.token,
    }))
}
