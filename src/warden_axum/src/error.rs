use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use warden_adapters::TokenAuthError;
use warden_application::LoginError;
use warden_core::{UserError, UserStoreError};

use crate::envelope::Envelope;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// `detail` is the underlying store or provider message, if any.
    #[error("{message}")]
    Internal {
        message: String,
        detail: Option<String>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: Some(detail.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::NotFound(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match self {
            ApiError::Validation(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message) => Envelope {
                message,
                data: Value::Array(Vec::new()),
            },
            ApiError::Internal { message, detail } => {
                tracing::error!(%message, detail = detail.as_deref().unwrap_or_default(), "request failed");
                Envelope {
                    message,
                    data: detail.map(Value::String).unwrap_or(Value::Array(Vec::new())),
                }
            }
        };

        (status, Json(envelope)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        ApiError::Unauthorized(error.to_string())
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserStoreError(UserStoreError::UserNotFound) => {
                ApiError::NotFound("User not found".to_owned())
            }
            LoginError::UserStoreError(UserStoreError::IncorrectPassword) => {
                ApiError::Unauthorized("Invalid Credentials.".to_owned())
            }
            LoginError::UserStoreError(e) => ApiError::internal("Login failed.", e),
            LoginError::TokenError(e) => ApiError::internal("Login failed.", e),
        }
    }
}
