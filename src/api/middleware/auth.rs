//! Bearer-token middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::api::AppState;
use crate::domain::UserRole;
use crate::errors::AppError;

async fn authorize(
    state: &AppState,
    mut request: Request,
    next: Next,
    required: Option<UserRole>,
) -> Result<Response, AppError> {
    let bearer = request.headers().typed_get::<Authorization<Bearer>>();
    let current_user = state
        .services
        .gate()
        .authorize(bearer.as_ref().map(|auth| auth.token()), required)?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require any valid session token.
///
/// Injects the `CurrentUser` into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, None).await
}

/// Require a session token carrying the ADMIN role.
pub async fn admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&state, request, next, Some(UserRole::Admin)).await
}
