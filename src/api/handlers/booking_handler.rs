//! Booking handlers. The whole router sits behind `auth_middleware`.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{AdminUser, Path, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Booking, BookingStatus};
use crate::errors::AppResult;
use crate::services::{BookingDraft, CurrentUser};

/// Reserve a vehicle
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Defaults to the caller; only admins may book for someone else
    pub user_id: Option<i64>,
    pub vehicle_id: i64,
    #[schema(value_type = String, example = "2024-06-01T10:00:00")]
    pub start_date: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-03T10:00:00")]
    pub end_date: NaiveDateTime,
}

pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", get(get_booking))
        .route("/user/:user_id", get(bookings_by_user))
        .route("/status/:status", get(bookings_by_status))
        .route("/:id/confirm", put(confirm_booking))
        .route("/:id/reject", put(reject_booking))
        .route("/:id/complete", put(complete_booking))
}

/// List every booking
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All bookings", body = Vec<Booking>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = state.services.bookings().list_all().await?;
    Ok(Json(bookings))
}

/// Create a PENDING booking
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking created", body = Booking),
        (status = 400, description = "Malformed request or unknown user/vehicle"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Booking for another user")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<Json<Booking>> {
    let user_id = current_user.resolve_owner(payload.user_id)?;
    let booking = state
        .services
        .bookings()
        .create(BookingDraft {
            user_id,
            vehicle_id: payload.vehicle_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;
    Ok(Json(booking))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings().get(id).await?;
    current_user.ensure_self_or_admin(booking.user_id)?;
    Ok(Json(booking))
}

/// Bookings owned by a user
#[utoipa::path(
    get,
    path = "/api/bookings/user/{user_id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("user_id" = i64, Path, description = "Owning user ID")),
    responses(
        (status = 200, description = "The user's bookings", body = Vec<Booking>),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn bookings_by_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Booking>>> {
    current_user.ensure_self_or_admin(user_id)?;
    let bookings = state.services.bookings().list_by_user(user_id).await?;
    Ok(Json(bookings))
}

/// Bookings in one status
#[utoipa::path(
    get,
    path = "/api/bookings/status/{status}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "PENDING, CONFIRMED, REJECTED or COMPLETED")),
    responses(
        (status = 200, description = "Matching bookings", body = Vec<Booking>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn bookings_by_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Booking>>> {
    let status: BookingStatus = status.parse()?;
    let bookings = state.services.bookings().list_by_status(status).await?;
    Ok(Json(bookings))
}

async fn transition(state: &AppState, id: i64, target: BookingStatus) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings().transition(id, target).await?;
    Ok(Json(booking))
}

/// Confirm a booking
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/confirm",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking confirmed", body = Booking),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn confirm_booking(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    transition(&state, id, BookingStatus::Confirmed).await
}

/// Reject a booking
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/reject",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking rejected", body = Booking),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn reject_booking(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    transition(&state, id, BookingStatus::Rejected).await
}

/// Complete a booking
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/complete",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking completed", body = Booking),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn complete_booking(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    transition(&state, id, BookingStatus::Completed).await
}
