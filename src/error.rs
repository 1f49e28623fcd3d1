use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    market::Ignored,
    response::{ApiResponse, Meta},
    verification::VerificationError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<Ignored> for AppError {
    fn from(reason: Ignored) -> Self {
        let message = reason.to_string();
        match reason {
            Ignored::NoSession => AppError::Unauthorized(message),
            Ignored::NotAShop | Ignored::NotAdmin | Ignored::LimitReached => {
                AppError::Forbidden(message)
            }
            Ignored::UnknownPlan | Ignored::NoSender | Ignored::IdentifierTaken => {
                AppError::BadRequest(message)
            }
            Ignored::UnknownProduct | Ignored::UnknownCategory => AppError::NotFound(message),
        }
    }
}

impl From<VerificationError> for AppError {
    fn from(err: VerificationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
