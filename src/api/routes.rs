//! Application route configuration.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{
    auth_routes, booking_routes, offer_routes, payment_routes, rental_routes, user_routes,
    vehicle_routes,
};
use super::middleware::{admin_middleware, auth_middleware};
use super::openapi::ApiDoc;
use super::AppState;
use crate::types::HealthResponse;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Public sign-in; public catalogue reads, admin checks per handler
        .nest("/auth", auth_routes())
        .nest("/vehicles", vehicle_routes())
        .nest("/offers", offer_routes())
        // Every route requires a session
        .nest(
            "/bookings",
            booking_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/rentals",
            rental_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .nest(
            "/payments",
            payment_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Admin only
        .nest(
            "/users",
            user_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                admin_middleware,
            )),
        );

    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Health check with a database round trip when one is configured
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => "healthy",
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                "unhealthy"
            }
        },
        None => "not configured",
    };

    if database == "unhealthy" {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "degraded",
                database,
            }),
        )
    } else {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database,
            }),
        )
    }
}
