//! Vehicle catalogue handlers.
//!
//! Reads are public; every mutation and the damaged listing need ADMIN.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::non_negative;
use crate::api::extractors::{AdminUser, Path, ValidatedJson};
use crate::api::AppState;
use crate::domain::{NewVehicle, Vehicle, VehicleChanges, VehicleType};
use crate::errors::AppResult;
use crate::services::VehicleCatalog;
use crate::types::Deleted;

/// New vehicle; it enters the fleet available and undamaged
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Toyota Camry")]
    pub name: String,
    #[schema(example = "2023")]
    pub model: Option<String>,
    #[schema(example = "AB123CD")]
    pub number: Option<String>,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = f64, example = 75)]
    pub rent_cost: Decimal,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
}

/// Generic vehicle update; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub model: Option<String>,
    pub number: Option<String>,
    #[validate(custom(function = "non_negative"))]
    #[schema(value_type = Option<f64>)]
    pub rent_cost: Option<Decimal>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub available: Option<bool>,
    pub damaged: Option<bool>,
}

impl From<UpdateVehicleRequest> for VehicleChanges {
    fn from(req: UpdateVehicleRequest) -> Self {
        Self {
            name: req.name,
            model: req.model,
            number: req.number,
            rent_cost: req.rent_cost,
            vehicle_type: req.vehicle_type,
            available: req.available,
            damaged: req.damaged,
        }
    }
}

/// Availability filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// CAR or BIKE, case-insensitive
    #[serde(rename = "type")]
    #[param(example = "CAR")]
    pub vehicle_type: Option<String>,
}

pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog).post(create_vehicle))
        .route("/available", get(available_vehicles))
        .route("/damaged", get(damaged_vehicles))
        .route("/type/:vehicle_type", get(vehicles_by_type))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/damage", put(mark_damaged))
        .route("/:id/repair", put(mark_repaired))
}

/// The whole fleet, grouped by type
#[utoipa::path(
    get,
    path = "/api/vehicles",
    tag = "Vehicles",
    responses((status = 200, description = "Cars and bikes", body = VehicleCatalog))
)]
pub async fn catalog(State(state): State<AppState>) -> AppResult<Json<VehicleCatalog>> {
    let catalog = state.services.vehicles().catalog().await?;
    Ok(Json(catalog))
}

/// Add a vehicle to the fleet
#[utoipa::path(
    post,
    path = "/api/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle created", body = Vehicle),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateVehicleRequest>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state
        .services
        .vehicles()
        .create(NewVehicle {
            name: payload.name,
            model: payload.model,
            number: payload.number,
            rent_cost: payload.rent_cost,
            vehicle_type: payload.vehicle_type,
        })
        .await?;
    Ok(Json(vehicle))
}

/// Every vehicle of one type, damaged or not
#[utoipa::path(
    get,
    path = "/api/vehicles/type/{vehicle_type}",
    tag = "Vehicles",
    params(("vehicle_type" = String, Path, description = "CAR or BIKE, case-insensitive")),
    responses(
        (status = 200, description = "Vehicles of the type", body = Vec<Vehicle>),
        (status = 400, description = "Unknown vehicle type")
    )
)]
pub async fn vehicles_by_type(
    State(state): State<AppState>,
    Path(vehicle_type): Path<String>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicle_type = vehicle_type.parse::<VehicleType>()?;
    let vehicles = state.services.vehicles().by_type(vehicle_type).await?;
    Ok(Json(vehicles))
}

/// Available vehicles, optionally of one type
#[utoipa::path(
    get,
    path = "/api/vehicles/available",
    tag = "Vehicles",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Available vehicles", body = Vec<Vehicle>),
        (status = 400, description = "Unknown vehicle type")
    )
)]
pub async fn available_vehicles(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicle_type = query
        .vehicle_type
        .as_deref()
        .map(str::parse::<VehicleType>)
        .transpose()?;
    let vehicles = state.services.vehicles().available(vehicle_type).await?;
    Ok(Json(vehicles))
}

/// Vehicles currently marked damaged
#[utoipa::path(
    get,
    path = "/api/vehicles/damaged",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Damaged vehicles", body = Vec<Vehicle>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn damaged_vehicles(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.services.vehicles().damaged().await?;
    Ok(Json(vehicles))
}

/// Get a vehicle by ID
#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle found", body = Vehicle),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.vehicles().get(id).await?;
    Ok(Json(vehicle))
}

/// Update vehicle fields
#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = Vehicle),
        (status = 400, description = "Malformed request"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateVehicleRequest>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.vehicles().update(id, payload.into()).await?;
    Ok(Json(vehicle))
}

/// Remove a vehicle from the fleet
#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Deleted> {
    state.services.vehicles().delete(id).await?;
    Ok(Deleted)
}

/// Take a vehicle out of service
#[utoipa::path(
    put,
    path = "/api/vehicles/{id}/damage",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle marked damaged", body = Vehicle),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn mark_damaged(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.vehicles().mark_damaged(id).await?;
    Ok(Json(vehicle))
}

/// Return a repaired vehicle to service
#[utoipa::path(
    put,
    path = "/api/vehicles/{id}/repair",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle repaired", body = Vehicle),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn mark_repaired(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.vehicles().mark_repaired(id).await?;
    Ok(Json(vehicle))
}
