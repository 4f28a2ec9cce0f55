//! Path extractor whose rejection is an `AppError`.

use axum::extract::{rejection::PathRejection, FromRequestParts};

use crate::errors::AppError;

/// Like `axum::extract::Path`, but a non-numeric id answers 400 with an
/// empty body instead of axum's plain-text rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}
