use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::FederatedLoginUseCase;
use warden_core::{Email, FederatedSession, IdentityProvider, Password};

use crate::{envelope::ApiResponse, error::ApiError, extract::pool_routing};

#[derive(Deserialize)]
pub struct FederatedLoginRequest {
    pub email: Option<Secret<String>>,
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Federated login", skip_all)]
pub async fn cognito_login<P>(
    State(identity_provider): State<P>,
    headers: HeaderMap,
    payload: Result<Json<FederatedLoginRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let invalid = |_| ApiError::validation("Email or Password is invalid.");
    let email = request
        .email
        .ok_or(())
        .and_then(|email| Email::try_from(email).map_err(|_| ()))
        .map_err(invalid)?;
    let password = request
        .password
        .ok_or(())
        .and_then(|password| Password::try_from(password).map_err(|_| ()))
        .map_err(invalid)?;

    let routing = pool_routing(&headers)?;

    let session = FederatedLoginUseCase::new(&identity_provider)
        .execute(&routing, email, password)
        .await
        .map_err(|e| ApiError::internal("User not found.", e))?;

    let response = match &session {
        FederatedSession::Authenticated { .. } => ApiResponse::ok("Authenticated."),
        FederatedSession::ChallengePending { .. } => {
            ApiResponse::ok("Temporary Password Change Required.").with_status(StatusCode::ACCEPTED)
        }
    };

    Ok(response.with_data(session))
}
