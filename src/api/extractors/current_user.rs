//! Identity extractors.
//!
//! `CurrentUser` is taken from the request extensions when an auth
//! middleware already ran, otherwise the bearer token is checked here.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::AppError;
use crate::services::CurrentUser;

fn resolve(parts: &Parts, state: &AppState, required: Option<UserRole>) -> Result<CurrentUser, AppError> {
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        if let Some(required) = required {
            if user.role != required {
                return Err(AppError::Forbidden);
            }
        }
        return Ok(user.clone());
    }

    let bearer = parts.headers.typed_get::<Authorization<Bearer>>();
    state
        .services
        .gate()
        .authorize(bearer.as_ref().map(|auth| auth.token()), required)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state, None)
    }
}

/// An authenticated caller holding the ADMIN role
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve(parts, state, Some(UserRole::Admin)).map(AdminUser)
    }
}
