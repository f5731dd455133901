use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    ValidationReport(#[from] garde::Report),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("token not provided")]
    Unauthenticated,
    #[error("Unauthorized access")]
    Forbidden,
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
    #[error(transparent)]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("gateway request failed")]
    Gateway(#[source] reqwest::Error),
    #[error("media upload failed")]
    MediaUpload(#[source] reqwest::Error),
    #[error("failed to send mail")]
    Mail(#[source] lettre::transport::smtp::Error),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::Validation(_) | AppError::ValidationReport(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            e @ (AppError::Database(_)
            | AppError::Bcrypt(_)
            | AppError::Gateway(_)
            | AppError::MediaUpload(_)
            | AppError::Mail(_)
            | AppError::Internal(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Internal failures keep a generic body; the real cause stays in the log
        let message = match &self {
            AppError::Database(_)
            | AppError::Bcrypt(_)
            | AppError::Internal(_) => "something went wrong".to_string(),
            AppError::Gateway(_) => "Failed to create checkout session".to_string(),
            other => other.to_string(),
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
