//! Application error type and its mapping onto the AJAX response envelope.
//!
//! Every failure leaves the service as `{"success": false}`. Only validation
//! failures carry a user-facing message; everything else is logged with its
//! details and reported without them.

use axum::{
    Json,
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::api::dto::envelope::{Envelope, MessageData};
use crate::domain::reseller::ResellerError;
use crate::infrastructure::cache::CacheError;

#[derive(Debug)]
pub enum AppError {
    /// Missing identity, missing capability or a bad anti-forgery token.
    Unauthorized { message: String, details: Value },
    /// Malformed user input. `message` is shown to the user.
    Validation { message: String, details: Value },
    /// A collaborator the operation depends on is missing or refused to work
    /// (no reseller, no cached check, failed purchase).
    Unavailable { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Unauthorized { message, .. } => write!(f, "unauthorized: {message}"),
            AppError::Validation { message, .. } => write!(f, "validation: {message}"),
            AppError::Unavailable { message, .. } => write!(f, "unavailable: {message}"),
            AppError::Internal { message, .. } => write!(f, "internal: {message}"),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized { message, details } => {
                tracing::warn!(%details, "Request rejected: {}", message);
                (StatusCode::FORBIDDEN, Json(Envelope::failure())).into_response()
            }
            AppError::Validation { message, details } => {
                tracing::debug!(%details, "Validation failed: {}", message);
                Json(Envelope::failure_with(MessageData { message })).into_response()
            }
            AppError::Unavailable { message, details } => {
                tracing::info!(%details, "Dependency unavailable: {}", message);
                Json(Envelope::failure()).into_response()
            }
            AppError::Internal { message, details } => {
                tracing::error!(%details, "Internal error: {}", message);
                Json(Envelope::failure()).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::internal(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "error": e.to_string() }))
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::internal("Cache error", json!({ "error": e.to_string() }))
    }
}

impl From<ResellerError> for AppError {
    fn from(e: ResellerError) -> Self {
        AppError::unavailable("Reseller error", json!({ "error": e.to_string() }))
    }
}

impl From<FormRejection> for AppError {
    fn from(e: FormRejection) -> Self {
        AppError::unavailable("Unreadable request body", json!({ "error": e.body_text() }))
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::unavailable("Unreadable query string", json!({ "error": e.body_text() }))
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::internal("Template rendering failed", json!({ "error": e.to_string() }))
    }
}

impl From<url::ParseError> for AppError {
    fn from(e: url::ParseError) -> Self {
        AppError::internal("Failed to build link", json!({ "error": e.to_string() }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::internal("Serialization failed", json!({ "error": e.to_string() }))
    }
}
