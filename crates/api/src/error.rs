//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use data_validator::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Batch refused by the normalizer
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body could not be decoded
    #[error("Invalid request body: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
