//! Response bodies shared across handlers.

use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::UserResponse;
use crate::services::AuthSession;

/// Outcome of a register or login attempt.
///
/// Failed attempts still answer HTTP 200 with `success: false`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Invalid email or password")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "USER")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl AuthResponse {
    pub fn signed_in(session: AuthSession) -> Self {
        let role = session.user.role.to_string();
        Self {
            success: true,
            message: None,
            token: Some(session.token.token),
            role: Some(role),
            user: Some(UserResponse::new(session.user, session.total_bookings)),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            token: None,
            role: None,
            user: None,
        }
    }
}

/// Health report
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,
    /// healthy, unhealthy or "not configured"
    #[schema(value_type = String, example = "healthy")]
    pub database: &'static str,
}

/// Successful delete: HTTP 200 with an empty body
pub struct Deleted;

impl IntoResponse for Deleted {
    fn into_response(self) -> axum::response::Response {
        StatusCode::OK.into_response()
    }
}
