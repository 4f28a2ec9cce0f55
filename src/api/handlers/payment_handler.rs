//! Payment handlers. The whole router sits behind `auth_middleware`.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::non_negative;
use crate::api::extractors::{AdminUser, Path, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Payment, PaymentChanges, PaymentStatus};
use crate::errors::AppResult;
use crate::services::{CurrentUser, PaymentDraft};
use crate::types::Deleted;

/// Record a payment against a booking; it starts PENDING
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Defaults to the caller; only admins may pay for someone else
    pub user_id: Option<i64>,
    pub booking_id: i64,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = f64, example = 150)]
    pub amount: Decimal,
    #[schema(example = "CARD")]
    pub payment_method: Option<String>,
}

/// Generic payment update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
}

impl From<UpdatePaymentRequest> for PaymentChanges {
    fn from(req: UpdatePaymentRequest) -> Self {
        Self {
            amount: req.amount,
            status: req.status,
            payment_method: req.payment_method,
        }
    }
}

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/status/:status", get(payments_by_status))
        .route("/user/:user_id", get(payments_by_user))
        .route("/:id", get(get_payment).put(update_payment).delete(delete_payment))
        .route("/:id/approve", put(approve_payment))
        .route("/:id/reject", put(reject_payment))
}

/// List every payment
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All payments", body = Vec<Payment>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Payment>>> {
    let payments = state.services.payments().list_all().await?;
    Ok(Json(payments))
}

/// Create a PENDING payment
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Payment created", body = Payment),
        (status = 400, description = "Malformed request or unknown user/booking"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Payment for another user")
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreatePaymentRequest>,
) -> AppResult<Json<Payment>> {
    let user_id = current_user.resolve_owner(payload.user_id)?;
    let payment = state
        .services
        .payments()
        .create(PaymentDraft {
            user_id,
            booking_id: payload.booking_id,
            amount: payload.amount,
            payment_method: payload.payment_method,
        })
        .await?;
    Ok(Json(payment))
}

/// Get a payment by ID
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    let payment = state.services.payments().get(id).await?;
    Ok(Json(payment))
}

/// Update payment fields
#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment ID")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 400, description = "Malformed request or illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdatePaymentRequest>,
) -> AppResult<Json<Payment>> {
    let payment = state.services.payments().update(id, payload.into()).await?;
    Ok(Json(payment))
}

/// Delete a payment
#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn delete_payment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Deleted> {
    state.services.payments().delete(id).await?;
    Ok(Deleted)
}

/// Mark a payment COMPLETED
#[utoipa::path(
    put,
    path = "/api/payments/{id}/approve",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment approved", body = Payment),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn approve_payment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    let payment = state.services.payments().approve(id).await?;
    Ok(Json(payment))
}

/// Mark a payment REJECTED
#[utoipa::path(
    put,
    path = "/api/payments/{id}/reject",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment rejected", body = Payment),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn reject_payment(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Payment>> {
    let payment = state.services.payments().reject(id).await?;
    Ok(Json(payment))
}

/// Payments in one status
#[utoipa::path(
    get,
    path = "/api/payments/status/{status}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "PENDING, COMPLETED or REJECTED")),
    responses(
        (status = 200, description = "Matching payments", body = Vec<Payment>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn payments_by_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Payment>>> {
    let status: PaymentStatus = status.parse()?;
    let payments = state.services.payments().list_by_status(status).await?;
    Ok(Json(payments))
}

/// Payments made by a user
#[utoipa::path(
    get,
    path = "/api/payments/user/{user_id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("user_id" = i64, Path, description = "Paying user ID")),
    responses(
        (status = 200, description = "The user's payments", body = Vec<Payment>),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn payments_by_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Payment>>> {
    current_user.ensure_self_or_admin(user_id)?;
    let payments = state.services.payments().list_by_user(user_id).await?;
    Ok(Json(payments))
}
