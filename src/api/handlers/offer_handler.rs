//! Promotional offer handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{AdminUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{NewOffer, Offer};
use crate::errors::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Weekend Special")]
    pub title: String,
    #[validate(length(min = 1, message = "Discount is required"))]
    #[schema(example = "10%")]
    pub discount: String,
    #[schema(value_type = Option<String>, example = "2025-12-31")]
    pub valid_till: Option<NaiveDate>,
    /// Defaults to true
    pub active: Option<bool>,
}

pub fn offer_routes() -> Router<AppState> {
    Router::new().route("/", get(active_offers).post(create_offer))
}

/// Offers currently running
#[utoipa::path(
    get,
    path = "/api/offers",
    tag = "Offers",
    responses((status = 200, description = "Active offers", body = Vec<Offer>))
)]
pub async fn active_offers(State(state): State<AppState>) -> AppResult<Json<Vec<Offer>>> {
    let offers = state.services.offers().list_active().await?;
    Ok(Json(offers))
}

/// Publish an offer
#[utoipa::path(
    post,
    path = "/api/offers",
    tag = "Offers",
    security(("bearer_auth" = [])),
    request_body = CreateOfferRequest,
    responses(
        (status = 200, description = "Offer created", body = Offer),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Admin access required")
    )
)]
pub async fn create_offer(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(payload): ValidatedJson<CreateOfferRequest>,
) -> AppResult<Json<Offer>> {
    let offer = state
        .services
        .offers()
        .create(NewOffer {
            title: payload.title,
            discount: payload.discount,
            valid_till: payload.valid_till,
            active: payload.active.unwrap_or(true),
        })
        .await?;
    Ok(Json(offer))
}
