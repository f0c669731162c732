/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>`, which converts automatically to the right status
/// code and a JSON body that always carries a human-readable `message`
/// field. Generation failures additionally carry the upstream detail in an
/// `error` field; internal failures are logged server-side and surfaced as
/// a generic 500 without leaking internals.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskhub_shared::auth::{jwt::JwtError, password::PasswordError};
use taskhub_shared::models::{book::BookError, task::TaskError};

use crate::ai::GenerationError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed required input (400)
    Validation(String),

    /// Missing or invalid bearer identity (401)
    Unauthorized(String),

    /// Resource absent or not owned by the caller (404)
    NotFound(String),

    /// Duplicate resource, e.g. an already-registered email (409)
    Conflict(String),

    /// External AI call or parse failure (500, upstream detail attached)
    Generation {
        /// User-facing message
        message: String,

        /// Upstream failure detail, returned in the `error` field
        detail: String,
    },

    /// Storage or other internal failure (500, detail only logged)
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,

    /// Upstream failure detail (generation errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Generation { message, detail } => {
                write!(f, "Generation failed: {} ({})", message, detail)
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Generation { message, detail } => {
                tracing::error!(error = %detail, "AI generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(detail))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique constraint violations surface as conflicts
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::Conflict("Email already registered".to_string());
                    }
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::BlankTitle => ApiError::Validation(err.to_string()),
            TaskError::Database(e) => e.into(),
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::NegativePrice | BookError::MissingField(_) => {
                ApiError::Validation(err.to_string())
            }
            BookError::Database(e) => e.into(),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::CreateError(msg) => ApiError::Internal(format!("Token creation: {}", msg)),
            _ => ApiError::Unauthorized("Token is not valid".to_string()),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        ApiError::Generation {
            message: "Failed to generate tasks".to_string(),
            detail: err.to_string(),
        }
    }
}
