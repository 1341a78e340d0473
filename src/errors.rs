use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Backend error: {0}")]
    Backend(StoreError),
    #[error("Student/Subject/Grade not found")]
    NotFound,
    #[error("Invalid year level: {0}")]
    InvalidYearLevel(String),
    #[error("Report rendering failed: {0}")]
    Render(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // A write that matched no row means the row vanished under us
            StoreError::MissingRow(_) => ApiError::NotFound,
            other => ApiError::Backend(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Backend(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "Student/Subject/Grade not found".to_string(),
            ),
            ApiError::InvalidYearLevel(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Render(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
