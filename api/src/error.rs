//! Unified error types for the PDFocus API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors, one variant per failure kind
//! - `NotificationError`: Feedback notifier failures (never fatal to a request)
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Boxed error used as the optional cause of an extraction failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Text extraction failed: {message}")]
    Extraction {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn storage(message: impl Into<String>, source: std::io::Error) -> Self {
        DomainError::Storage {
            message: message.into(),
            source,
        }
    }

    pub fn extraction(message: impl Into<String>) -> Self {
        DomainError::Extraction {
            message: message.into(),
            source: None,
        }
    }

    pub fn extraction_caused_by(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        DomainError::Extraction {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Notification errors
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to send email to {recipient}")]
    Delivery {
        recipient: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Invalid email configuration: {0}")]
    Configuration(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Domain(e @ DomainError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Not found", Some(e.to_string()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::CONFLICT, "Conflict", Some(msg.clone()))
            }
            AppError::Domain(DomainError::QuotaExceeded(msg)) => (
                StatusCode::TOO_MANY_REQUESTS,
                "Quota exceeded",
                Some(msg.clone()),
            ),
            AppError::Domain(e @ DomainError::Extraction { .. }) => {
                tracing::warn!(error = ?e, "Text extraction failed");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Text extraction failed",
                    Some(e.to_string()),
                )
            }
            AppError::Domain(DomainError::Storage { message, source }) => {
                tracing::error!(error = %source, "Storage error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
