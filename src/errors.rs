//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.
//!
//! The HTTP surface is deliberately coarse: missing resources and malformed
//! input produce empty bodies, and auth failures never say which check failed.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{MSG_ACCESS_DENIED, MSG_AUTHENTICATION_REQUIRED, MSG_INVALID_CREDENTIALS};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Requested role does not match account role")]
    RoleMismatch,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Illegal transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Body for auth failures and server errors
#[derive(Debug, Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl AppError {
    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials | AppError::RoleMismatch => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::InvalidTransition { .. } => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) | AppError::Jwt(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing message (hides internal details).
    ///
    /// `None` means the response carries an empty body.
    fn user_message(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthenticated => Some(MSG_AUTHENTICATION_REQUIRED),
            AppError::Forbidden => Some(MSG_ACCESS_DENIED),
            AppError::InvalidCredentials | AppError::RoleMismatch => Some(MSG_INVALID_CREDENTIALS),

            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                Some("An internal error occurred")
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                Some("An internal error occurred")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Some("An internal error occurred")
            }

            AppError::Validation(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                None
            }
            AppError::InvalidTransition { from, to } => {
                tracing::debug!(from = %from, to = %to, "Rejected illegal transition");
                None
            }
            AppError::NotFound | AppError::Conflict(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.user_message() {
            Some(message) => (
                status,
                Json(ErrorResponse {
                    success: false,
                    message: message.to_string(),
                }),
            )
                .into_response(),
            None => status.into_response(),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        AppError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
