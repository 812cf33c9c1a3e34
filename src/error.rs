use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::MappingError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request body: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error("Invalid query parameters: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Invalid path parameters: {0}")]
    InvalidPath(#[from] PathRejection),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Row mapping error: {0}")]
    Mapping(#[from] MappingError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone())),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(msg.clone())),
            AppError::InvalidJson(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body",
                Some(e.body_text()),
            ),
            AppError::InvalidQuery(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid query parameters",
                Some(e.body_text()),
            ),
            AppError::InvalidPath(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid path parameters",
                Some(e.body_text()),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
            AppError::Pool(e) => {
                tracing::error!("Pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
            AppError::Mapping(e) => {
                tracing::error!("Row mapping error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
