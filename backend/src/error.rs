//! Application error handling
//!
//! The single translation layer from core error kinds to HTTP responses.
//! Internal causes are logged here and replaced by a generic message.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use session_auth_shared::{AuthError, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(err) => match err {
                AuthError::UserExists
                | AuthError::InvalidCredentials
                | AuthError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
                AuthError::Token(_) => StatusCode::UNAUTHORIZED,
                AuthError::StoreFailure(_) | AuthError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            ApiError::BadRequest(msg) => ("BAD_REQUEST", msg.clone()),
            ApiError::Auth(err) if err.is_internal() => {
                let cause = std::error::Error::source(err).map(|s| s.to_string());
                error!(code = err.code(), cause = ?cause, "Request failed");
                (err.code(), "Server error".to_string())
            }
            ApiError::Auth(err) => (err.code(), err.to_string()),
        };

        let body = Json(ErrorResponse {
            message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
