//! Rental handlers. The whole router sits behind `auth_middleware`.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::non_negative;
use crate::api::extractors::{AdminUser, Path, ValidatedJson};
use crate::api::AppState;
use crate::domain::{BookingStatus, Rental, RentalChanges};
use crate::errors::AppResult;
use crate::services::{CurrentUser, RentalDraft};
use crate::types::Deleted;

/// Open a rental
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    /// Defaults to the caller; only admins may rent for someone else
    pub user_id: Option<i64>,
    pub vehicle_id: i64,
    #[schema(value_type = String, example = "2024-06-01T10:00:00")]
    pub start_date: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-03T10:00:00")]
    pub end_date: NaiveDateTime,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<f64>, example = 150)]
    pub total_cost: Option<Decimal>,
    #[schema(example = "Airport")]
    pub pickup_location: Option<String>,
    /// Omit to start PENDING
    pub status: Option<BookingStatus>,
}

/// Generic rental update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalRequest {
    #[schema(value_type = Option<String>)]
    pub start_date: Option<NaiveDateTime>,
    #[schema(value_type = Option<String>)]
    pub end_date: Option<NaiveDateTime>,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<f64>)]
    pub total_cost: Option<Decimal>,
    pub status: Option<BookingStatus>,
    pub pickup_location: Option<String>,
}

impl From<UpdateRentalRequest> for RentalChanges {
    fn from(req: UpdateRentalRequest) -> Self {
        Self {
            start_date: req.start_date,
            end_date: req.end_date,
            total_cost: req.total_cost,
            status: req.status,
            pickup_location: req.pickup_location,
        }
    }
}

/// Optional status filter for a user's rentals
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RentalStatusQuery {
    /// PENDING, CONFIRMED, REJECTED or COMPLETED, case-insensitive
    #[param(example = "PENDING")]
    pub status: Option<String>,
}

pub fn rental_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals).post(create_rental))
        .route("/pending", get(pending_rentals))
        .route("/status/:status", get(rentals_by_status))
        .route("/user/:user_id", get(rentals_by_user))
        .route("/vehicle/:vehicle_id", get(rentals_by_vehicle))
        .route("/:id", get(get_rental).put(update_rental).delete(delete_rental))
        .route("/:id/confirm", put(confirm_rental))
        .route("/:id/reject", put(reject_rental))
        .route("/:id/complete", put(complete_rental))
}

/// List every rental
#[utoipa::path(
    get,
    path = "/api/rentals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All rentals", body = Vec<Rental>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn list_rentals(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Rental>>> {
    let rentals = state.services.rentals().list_all().await?;
    Ok(Json(rentals))
}

/// Create a rental
#[utoipa::path(
    post,
    path = "/api/rentals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    request_body = CreateRentalRequest,
    responses(
        (status = 200, description = "Rental created", body = Rental),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Rental for another user")
    )
)]
pub async fn create_rental(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateRentalRequest>,
) -> AppResult<Json<Rental>> {
    let user_id = current_user.resolve_owner(payload.user_id)?;
    let rental = state
        .services
        .rentals()
        .create(RentalDraft {
            user_id,
            vehicle_id: payload.vehicle_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            total_cost: payload.total_cost,
            pickup_location: payload.pickup_location,
            status: payload.status,
        })
        .await?;
    Ok(Json(rental))
}

/// Get a rental by ID
#[utoipa::path(
    get,
    path = "/api/rentals/{id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental found", body = Rental),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Rental>> {
    let rental = state.services.rentals().get(id).await?;
    Ok(Json(rental))
}

/// Update rental fields
#[utoipa::path(
    put,
    path = "/api/rentals/{id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Rental ID")),
    request_body = UpdateRentalRequest,
    responses(
        (status = 200, description = "Rental updated", body = Rental),
        (status = 400, description = "Malformed request or illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn update_rental(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateRentalRequest>,
) -> AppResult<Json<Rental>> {
    let rental = state.services.rentals().update(id, payload.into()).await?;
    Ok(Json(rental))
}

/// Delete a rental
#[utoipa::path(
    delete,
    path = "/api/rentals/{id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn delete_rental(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Deleted> {
    state.services.rentals().delete(id).await?;
    Ok(Deleted)
}

async fn transition(state: &AppState, id: i64, target: BookingStatus) -> AppResult<Json<Rental>> {
    let rental = state.services.rentals().transition(id, target).await?;
    Ok(Json(rental))
}

/// Confirm a rental
#[utoipa::path(
    put,
    path = "/api/rentals/{id}/confirm",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental confirmed", body = Rental),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn confirm_rental(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Rental>> {
    transition(&state, id, BookingStatus::Confirmed).await
}

/// Reject a rental
#[utoipa::path(
    put,
    path = "/api/rentals/{id}/reject",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental rejected", body = Rental),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn reject_rental(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Rental>> {
    transition(&state, id, BookingStatus::Rejected).await
}

/// Complete a rental
#[utoipa::path(
    put,
    path = "/api/rentals/{id}/complete",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental completed", body = Rental),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn complete_rental(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Rental>> {
    transition(&state, id, BookingStatus::Completed).await
}

/// Rentals in one status
#[utoipa::path(
    get,
    path = "/api/rentals/status/{status}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("status" = String, Path, description = "PENDING, CONFIRMED, REJECTED or COMPLETED")),
    responses(
        (status = 200, description = "Matching rentals", body = Vec<Rental>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn rentals_by_status(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Rental>>> {
    let status: BookingStatus = status.parse()?;
    let rentals = state.services.rentals().list_by_status(status).await?;
    Ok(Json(rentals))
}

/// PENDING rentals, most recently booked first
#[utoipa::path(
    get,
    path = "/api/rentals/pending",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending rentals", body = Vec<Rental>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn pending_rentals(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Rental>>> {
    let rentals = state.services.rentals().list_pending().await?;
    Ok(Json(rentals))
}

/// Rentals owned by a user
#[utoipa::path(
    get,
    path = "/api/rentals/user/{user_id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(
        ("user_id" = i64, Path, description = "Owning user ID"),
        RentalStatusQuery
    ),
    responses(
        (status = 200, description = "The user's rentals", body = Vec<Rental>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn rentals_by_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_id): Path<i64>,
    Query(query): Query<RentalStatusQuery>,
) -> AppResult<Json<Vec<Rental>>> {
    current_user.ensure_self_or_admin(user_id)?;
    let status = query
        .status
        .as_deref()
        .map(str::parse::<BookingStatus>)
        .transpose()?;
    let rentals = state.services.rentals().list_by_user(user_id, status).await?;
    Ok(Json(rentals))
}

/// Rentals of one vehicle
#[utoipa::path(
    get,
    path = "/api/rentals/vehicle/{vehicle_id}",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("vehicle_id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "The vehicle's rentals", body = Vec<Rental>),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn rentals_by_vehicle(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(vehicle_id): Path<i64>,
) -> AppResult<Json<Vec<Rental>>> {
    let rentals = state.services.rentals().list_by_vehicle(vehicle_id).await?;
    Ok(Json(rentals))
}
