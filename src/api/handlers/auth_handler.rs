//! Authentication handlers.
//!
//! Failed sign-ins and duplicate registrations are answered with HTTP 200
//! and `success: false`; browser clients branch on the flag, not the status.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MSG_EMAIL_EXISTS, MSG_INVALID_CREDENTIALS, MSG_INVALID_ROLE};
use crate::errors::{AppError, AppResult};
use crate::services::{Credentials, Registration};
use crate::types::AuthResponse;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "John Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@rentx.com")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "user123")]
    pub password: String,
    #[schema(example = "+91 9876543210")]
    pub phone: Option<String>,
    pub address: Option<String>,
    /// "ADMIN" (any case) creates an administrator; anything else a regular user
    #[schema(example = "USER")]
    pub role: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "user@rentx.com")]
    pub email: String,
    #[schema(example = "user123")]
    pub password: String,
    /// Role the client is signing in as
    #[schema(example = "USER")]
    pub role: Option<String>,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Registered and signed in, or `success: false` when the email is taken", body = AuthResponse),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let registration = Registration {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        phone: payload.phone,
        address: payload.address,
        role: payload.role,
    };

    match state.services.auth().register(registration).await {
        Ok(session) => Ok(Json(AuthResponse::signed_in(session))),
        Err(AppError::Conflict(_)) => Ok(Json(AuthResponse::failure(MSG_EMAIL_EXISTS))),
        Err(e) => Err(e),
    }
}

/// Sign in with email, password and role
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in, or `success: false` with the reason", body = AuthResponse),
        (status = 400, description = "Malformed request")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let credentials = Credentials {
        email: payload.email,
        password: payload.password,
        role: payload.role,
    };

    match state.services.auth().login(credentials).await {
        Ok(session) => Ok(Json(AuthResponse::signed_in(session))),
        Err(AppError::InvalidCredentials) => Ok(Json(AuthResponse::failure(MSG_INVALID_CREDENTIALS))),
        Err(AppError::RoleMismatch) => {
            let message = if state.config.uniform_auth_errors {
                MSG_INVALID_CREDENTIALS
            } else {
                MSG_INVALID_ROLE
            };
            Ok(Json(AuthResponse::failure(message)))
        }
        Err(e) => Err(e),
    }
}
