//! API error handling
//!
//! Domain errors are mapped to a status code and a `{ error, message }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::{CoreError, PortError};
use domain_catalog::CatalogError;
use domain_insurance::InsuranceError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidRange(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Failed to read request payload: {0}")]
    PayloadRead(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::InvalidRange(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidState(_) | ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadRead(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::InvalidRange(_) => "invalid_range",
            ApiError::InvalidState(_) => "invalid_state",
            ApiError::Conflict(_) => "conflict",
            ApiError::Validation(_) => "validation_error",
            ApiError::PayloadRead(_) => "payload_read_error",
            ApiError::Database(_) => "database_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { message, .. } => ApiError::Validation(message),
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Connection { .. } => ApiError::Database(err.to_string()),
            PortError::Internal { .. } => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<InsuranceError> for ApiError {
    fn from(err: InsuranceError) -> Self {
        match err {
            InsuranceError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            InsuranceError::InvalidRange(message) => ApiError::InvalidRange(message),
            InsuranceError::InvalidState(message) => ApiError::InvalidState(message),
            InsuranceError::Conflict(message) => ApiError::Conflict(message),
            InsuranceError::Validation(message) => ApiError::Validation(message),
            InsuranceError::Port(port) => ApiError::from(port),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CatalogError::Validation(message) => ApiError::Validation(message),
            CatalogError::Conflict(message) => ApiError::Conflict(message),
            CatalogError::Port(port) => ApiError::from(port),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(message) => ApiError::Validation(message),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        ApiError::Validation(messages.join("; "))
    }
}
