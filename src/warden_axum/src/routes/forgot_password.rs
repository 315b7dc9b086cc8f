use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::ForgotPasswordUseCase;
use warden_core::{Email, IdentityProvider, required};

use crate::{envelope::ApiResponse, error::ApiError, extract::client_id};

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<Secret<String>>,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<P>(
    State(identity_provider): State<P>,
    headers: HeaderMap,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let email = Email::try_from(required(request.email, "Email")?)?;
    let client_id = client_id(&headers)?;

    if ForgotPasswordUseCase::new(&identity_provider)
        .execute(&client_id, email)
        .await
    {
        Ok(ApiResponse::ok(
            "Success, we have forwarded password reset code to the respective mail.",
        ))
    } else {
        Err(ApiError::Internal {
            message: "Forget password process failed.".to_owned(),
            detail: None,
        })
    }
}
