use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::Value;
use warden_application::FederatedRegisterUseCase;
use warden_core::{Email, IdentityProvider, UserName, required};

use crate::{envelope::ApiResponse, error::ApiError, extract::pool_id};

#[derive(Deserialize)]
pub struct FederatedRegisterRequest {
    pub name: Option<String>,
    pub email: Option<Secret<String>>,
    /// `true`/`false` as a JSON bool or string; anything else counts as false.
    #[serde(default)]
    pub email_verified: Option<Value>,
}

fn is_verified(value: Option<Value>) -> bool {
    match value {
        Some(Value::Bool(verified)) => verified,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[tracing::instrument(name = "Federated register", skip_all)]
pub async fn cognito_register<P>(
    State(identity_provider): State<P>,
    headers: HeaderMap,
    payload: Result<Json<FederatedRegisterRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let name = UserName::try_from(request.name.unwrap_or_default())?;
    let email = Email::try_from(required(request.email, "Email")?)?;
    let pool_id = pool_id(&headers)?;

    let user = FederatedRegisterUseCase::new(&identity_provider)
        .execute(&pool_id, name, email, is_verified(request.email_verified))
        .await
        .map_err(|e| ApiError::internal("Could not proceed with register.", e))?;

    Ok(ApiResponse::ok("User Created. Email has been sent to respective email.").with_data(user))
}
