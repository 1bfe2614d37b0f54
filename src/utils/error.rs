//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::energy::ModelError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Input rejected by the energy model
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ModelError),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub response_type: String,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request_error",
            AppError::InvalidArgument(_) => "invalid_argument",
            AppError::NotFound(_) => "not_found_error",
        }
    }

    /// Convert to the JSON error envelope
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            response_type: "error".to_string(),
            error: ErrorBody {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        }
    }
}

/// Implement IntoResponse trait to allow errors to be returned directly as HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!("Client error: {} - Status code: {}", self, status);

        let error_response = self.to_error_response();

        (status, Json(error_response)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
