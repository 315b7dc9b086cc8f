use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::Value;
use warden_application::CreatePoolUseCase;
use warden_core::{AuthenticatedUser, IdentityProvider, StoreName};

use crate::{envelope::ApiResponse, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePoolRequest {
    pub store_name: Option<String>,
    /// A JSON integer or a string holding one.
    pub store_id: Option<Value>,
}

fn parse_store_id(value: Option<Value>) -> Result<i64, ApiError> {
    let not_an_integer = || ApiError::validation("Store id must be an integer.");
    match value {
        None | Some(Value::Null) => Err(ApiError::validation("Store id field is empty.")),
        Some(Value::Number(number)) => number.as_i64().ok_or_else(not_an_integer),
        Some(Value::String(text)) if text.trim().is_empty() => {
            Err(ApiError::validation("Store id field is empty."))
        }
        Some(Value::String(text)) => text.trim().parse().map_err(|_| not_an_integer()),
        Some(_) => Err(not_an_integer()),
    }
}

#[tracing::instrument(name = "Create pool", skip_all)]
pub async fn create_pool<P>(
    State(identity_provider): State<P>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreatePoolRequest>, JsonRejection>,
) -> Result<ApiResponse, ApiError>
where
    P: IdentityProvider + Clone + 'static,
{
    let Json(request) = payload?;

    let store_name = StoreName::try_from(request.store_name.unwrap_or_default())?;
    let store_id = parse_store_id(request.store_id)?;

    tracing::info!(user_id = %user.id, store_id, "provisioning pool");

    let credentials = CreatePoolUseCase::new(&identity_provider)
        .execute(store_name, store_id)
        .await
        .map_err(|e| ApiError::internal("Pool create request failed.", e))?;

    Ok(ApiResponse::ok("Pool and Client ID created.").with_data(credentials))
}
