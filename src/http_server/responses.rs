//! Error-to-response conversion.
//!
//! Every failure leaving the API goes through one of the conversions
//! here. Client errors keep their message; internal failures are logged
//! and masked behind a generic body so store details never reach clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::store::StoreError;

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Unified handler error
#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    Store(StoreError),
    /// Rejected request payload (blank required fields and the like)
    Validation(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let code = self.status_code();

        let message = if self.is_client_error() {
            self.to_string()
        } else {
            tracing::error!(error = %self, "auth internal failure");
            "Internal server error".to_string()
        };

        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse { error: message, code })).into_response()
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            StoreError::Database(_) | StoreError::Corrupt(_) => {
                tracing::error!(error = %self, "store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                code: status.as_u16(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) => err.into_response(),
            ApiError::Store(err) => err.into_response(),
            ApiError::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: message,
                    code: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
                }),
            )
                .into_response(),
        }
    }
}
