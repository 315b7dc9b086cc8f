use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::ForcePasswordChangeUseCase;
use warden_core::{Email, IdentityProvider, Password, required};

use super::invalid_request_data;
use crate::{envelope::ApiResponse, error::ApiError, extract::client_id};

#[derive(Deserialize)]
pub struct ForcePasswordChangeRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
    pub cognito_session: Option<Secret<String>>,
}

#[tracing::instrument(name = "Force password change", skip_all)]
pub async fn force_password_change<P>(
    State(identity_provider): State<P>,
    headers: HeaderMap,
    payload: Result<Json<ForcePasswordChangeRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let email = required(request.email, "Email").map_err(invalid_request_data)?;
    let password = required(request.password, "Password").map_err(invalid_request_data)?;
    let session =
        required(request.cognito_session, "Session").map_err(invalid_request_data)?;

    let email = Email::try_from(email).map_err(invalid_request_data)?;
    let password = Password::try_from(password).map_err(invalid_request_data)?;
    let client_id = client_id(&headers)?;

    let cognito_username = ForcePasswordChangeUseCase::new(&identity_provider)
        .execute(&client_id, email, password, session)
        .await
        .map_err(|e| ApiError::internal("Force password change process failed.", e))?;

    Ok(ApiResponse::ok("Password changed successfully.")
        .with_data(serde_json::json!({ "cognito_username": cognito_username })))
}
