use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::ResetPasswordUseCase;
use warden_core::{Email, IdentityProvider, Password, required};

use super::invalid_request_data;
use crate::{envelope::ApiResponse, error::ApiError, extract::client_id};

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
    pub code: Option<Secret<String>>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<P>(
    State(identity_provider): State<P>,
    headers: HeaderMap,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let email = required(request.email, "Email").map_err(invalid_request_data)?;
    let password = required(request.password, "Password").map_err(invalid_request_data)?;
    let code = required(request.code, "Code").map_err(invalid_request_data)?;

    let email = Email::try_from(email).map_err(invalid_request_data)?;
    let password = Password::try_from(password).map_err(invalid_request_data)?;
    let client_id = client_id(&headers)?;

    ResetPasswordUseCase::new(&identity_provider)
        .execute(&client_id, email, password, code)
        .await
        .map_err(|e| ApiError::internal("Password reset process failed.", e))?;

    Ok(ApiResponse::ok("Password changed successfully."))
}
