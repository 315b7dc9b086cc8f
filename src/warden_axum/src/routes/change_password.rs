use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::ChangePasswordUseCase;
use warden_core::{Email, IdentityProvider, Password, required};

use crate::{envelope::ApiResponse, error::ApiError, extract::pool_routing};

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub email: Option<Secret<String>>,
    pub current_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<P>(
    State(identity_provider): State<P>,
    headers: HeaderMap,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let current_password = Password::try_from(required(request.current_password, "Password")?)?;
    let new_password = Password::try_from(required(request.new_password, "Password")?)?;
    let email = Email::try_from(required(request.email, "Email")?)?;
    let routing = pool_routing(&headers)?;

    ChangePasswordUseCase::new(&identity_provider)
        .execute(&routing, email, current_password, new_password)
        .await
        .map_err(|e| ApiError::internal("Password change failed.", e))?;

    Ok(ApiResponse::ok("Password update successful."))
}
