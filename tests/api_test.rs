//! HTTP surface tests: authentication, access control, vehicles, offers
//! and user administration, driven through the router.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{test_config, TestApp};
use rentx_api::domain::{TransitionPolicy, UserRole};

async fn register(app: &TestApp, email: &str, role: Option<&str>) -> Value {
    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({
                "name": "Jane Doe",
                "email": email,
                "password": "secret123",
                "phone": "+91 9876543210",
                "role": role,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body.unwrap()
}

async fn login(app: &TestApp, email: &str, password: &str, role: &str) -> Value {
    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": password, "role": role }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body.unwrap()
}

// =============================================================================
// Infrastructure endpoints
// =============================================================================

#[tokio::test]
async fn test_health_without_database() {
    let app = TestApp::new();
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "not configured");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();
    let (status, body) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.unwrap()["paths"]["/api/rentals/{id}/confirm"].is_object());
}

// =============================================================================
// Registration and login
// =============================================================================

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let app = TestApp::new();
    let body = register(&app, "Jane@RentX.com", None).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "USER");
    assert_eq!(body["user"]["email"], "jane@rentx.com");
    assert_eq!(body["user"]["totalBookings"], 0);
    assert!(body["user"].get("passwordHash").is_none());

    let token = body["token"].as_str().unwrap();
    let claims = app.tokens.validate(token).into_claims().unwrap();
    assert_eq!(claims.role, "USER");
    assert_eq!(claims.sub, "jane@rentx.com");
}

#[tokio::test]
async fn test_register_admin_role_is_case_insensitive() {
    let app = TestApp::new();
    let body = register(&app, "boss@rentx.com", Some("admin")).await;
    assert_eq!(body["role"], "ADMIN");

    let other = register(&app, "other@rentx.com", Some("MANAGER")).await;
    assert_eq!(other["role"], "USER");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new();
    register(&app, "jane@rentx.com", None).await;

    let body = register(&app, "JANE@rentx.com", None).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");
    assert!(body.get("token").is_none());
    assert_eq!(app.storage.user_count(), 1);
}

#[tokio::test]
async fn test_register_malformed_email_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "X", "email": "not-an-email", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    register(&app, "jane@rentx.com", None).await;

    let body = login(&app, "jane@rentx.com", "secret123", "user").await;
    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "USER");
    assert_eq!(body["user"]["name"], "Jane Doe");
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::new();
    register(&app, "jane@rentx.com", None).await;

    let wrong_password = login(&app, "jane@rentx.com", "nope", "USER").await;
    let unknown_email = login(&app, "ghost@rentx.com", "secret123", "USER").await;

    for body in [wrong_password, unknown_email] {
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid email or password");
    }
}

#[tokio::test]
async fn test_login_role_mismatch() {
    let app = TestApp::new();
    register(&app, "jane@rentx.com", None).await;

    let body = login(&app, "jane@rentx.com", "secret123", "ADMIN").await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid role selected for this account");
}

#[tokio::test]
async fn test_login_role_mismatch_uniform_message() {
    let mut config = test_config(TransitionPolicy::Permissive);
    config.uniform_auth_errors = true;
    let app = TestApp::with_config(config);
    register(&app, "jane@rentx.com", None).await;

    let body = login(&app, "jane@rentx.com", "secret123", "ADMIN").await;
    assert_eq!(body["message"], "Invalid email or password");
}

// =============================================================================
// Access control
// =============================================================================

#[tokio::test]
async fn test_missing_and_invalid_tokens_are_unauthorized() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/bookings", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body = body.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Authentication required");

    let (status, _) = app.get("/api/users", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_another_key_is_unauthorized() {
    let app = TestApp::new();
    let foreign = TestApp::with_config(rentx_api::config::Config::default());
    let token = foreign.admin_token();

    let (status, _) = app.get("/api/users", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_role_is_forbidden_on_admin_routes() {
    let app = TestApp::new();
    let token = app.token_for(5, UserRole::User);

    for uri in ["/api/users", "/api/bookings", "/api/rentals/pending", "/api/vehicles/damaged"] {
        let (status, body) = app.get(uri, Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", uri);
        assert_eq!(body.unwrap()["message"], "Access denied");
    }
}

// =============================================================================
// Vehicles
// =============================================================================

async fn create_vehicle(app: &TestApp, name: &str, vehicle_type: &str, rent_cost: f64) -> Value {
    let (status, body) = app
        .post(
            "/api/vehicles",
            Some(&app.admin_token()),
            json!({ "name": name, "type": vehicle_type, "rentCost": rent_cost, "number": "AB123CD" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body.unwrap()
}

#[tokio::test]
async fn test_create_vehicle_starts_available() {
    let app = TestApp::new();
    let vehicle = create_vehicle(&app, "Toyota Camry", "CAR", 75.0).await;

    assert_eq!(vehicle["name"], "Toyota Camry");
    assert_eq!(vehicle["type"], "CAR");
    assert_eq!(vehicle["rentCost"], 75.0);
    assert_eq!(vehicle["available"], true);
    assert_eq!(vehicle["damaged"], false);
}

#[tokio::test]
async fn test_create_vehicle_requires_admin() {
    let app = TestApp::new();
    let body = json!({ "name": "Honda CBR", "type": "BIKE", "rentCost": 40 });

    let (status, _) = app.post("/api/vehicles", None, body.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = app.token_for(2, UserRole::User);
    let (status, _) = app.post("/api/vehicles", Some(&user), body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_vehicle_rejects_bad_body() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, body) = app
        .post("/api/vehicles", Some(&admin), json!({ "name": "Tank", "type": "TANK", "rentCost": 1 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_none());

    let (status, _) = app
        .post("/api/vehicles", Some(&admin), json!({ "name": "Cheap", "type": "CAR", "rentCost": -5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_groups_by_type() {
    let app = TestApp::new();
    create_vehicle(&app, "Toyota Camry", "CAR", 75.0).await;
    create_vehicle(&app, "Honda Accord", "CAR", 80.0).await;
    create_vehicle(&app, "Yamaha R1", "BIKE", 50.0).await;

    let (status, body) = app.get("/api/vehicles", None).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["cars"].as_array().unwrap().len(), 2);
    assert_eq!(body["bikes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_damage_and_repair() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let id = create_vehicle(&app, "Toyota Camry", "CAR", 75.0).await["id"].as_i64().unwrap();

    let (status, body) = app.put(&format!("/api/vehicles/{}/damage", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["available"], false);
    assert_eq!(body["damaged"], true);

    let (_, damaged) = app.get("/api/vehicles/damaged", Some(&admin)).await;
    assert_eq!(damaged.unwrap().as_array().unwrap().len(), 1);

    let (_, available) = app.get("/api/vehicles/available?type=car", None).await;
    assert!(available.unwrap().as_array().unwrap().is_empty());

    let (status, body) = app.put(&format!("/api/vehicles/{}/repair", id), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["available"], true);
    assert_eq!(body["damaged"], false);

    let (_, available) = app.get("/api/vehicles/available?type=CAR", None).await;
    assert_eq!(available.unwrap().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_available_rejects_unknown_type() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/vehicles/available?type=boat", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_vehicles_by_type_includes_damaged() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let car = create_vehicle(&app, "Toyota Camry", "CAR", 75.0).await["id"].as_i64().unwrap();
    create_vehicle(&app, "Honda CBR", "BIKE", 40.0).await;
    app.put(&format!("/api/vehicles/{}/damage", car), Some(&admin), None).await;

    let (status, cars) = app.get("/api/vehicles/type/car", None).await;
    assert_eq!(status, StatusCode::OK);
    let cars = cars.unwrap();
    let cars = cars.as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["damaged"], true);

    let (status, body) = app.get("/api/vehicles/type/boat", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_update_and_delete_vehicle() {
    let app = TestApp::new();
    let admin = app.admin_token();
    let id = create_vehicle(&app, "Honda CBR", "BIKE", 40.0).await["id"].as_i64().unwrap();
    let uri = format!("/api/vehicles/{}", id);

    let (status, body) = app
        .put(&uri, Some(&admin), Some(json!({ "rentCost": 45.5, "model": "2024" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    let body = body.unwrap();
    assert_eq!(body["rentCost"], 45.5);
    assert_eq!(body["model"], "2024");
    assert_eq!(body["name"], "Honda CBR");

    let (status, body) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_none());

    let (status, body) = app.get(&uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_none());

    let (status, _) = app.delete(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/vehicles/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_none());
}

#[tokio::test]
async fn test_missing_vehicle_operations_are_not_found() {
    let app = TestApp::new();
    let admin = app.admin_token();
    for uri in ["/api/vehicles/999/damage", "/api/vehicles/999/repair"] {
        let (status, body) = app.put(uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_none());
    }
}

// =============================================================================
// Offers
// =============================================================================

#[tokio::test]
async fn test_offers_public_listing_shows_active_only() {
    let app = TestApp::new();
    let admin = app.admin_token();

    let (status, _) = app
        .post("/api/offers", Some(&admin), json!({ "title": "Weekend Special", "discount": "10%" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .post(
            "/api/offers",
            Some(&admin),
            json!({ "title": "Expired", "discount": "50%", "validTill": "2020-01-01", "active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/offers", None).await;
    assert_eq!(status, StatusCode::OK);
    let offers = body.unwrap();
    let offers = offers.as_array().unwrap();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0]["title"], "Weekend Special");
    assert_eq!(offers[0]["active"], true);
}

#[tokio::test]
async fn test_create_offer_requires_admin() {
    let app = TestApp::new();
    let user = app.token_for(3, UserRole::User);
    let (status, _) = app
        .post("/api/offers", Some(&user), json!({ "title": "Free", "discount": "100%" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_admin_lists_users_with_booking_counts() {
    let app = TestApp::new();
    let jane = register(&app, "jane@rentx.com", None).await;
    let jane_id = jane["user"]["id"].as_i64().unwrap();
    let jane_token = jane["token"].as_str().unwrap().to_string();
    let vehicle_id = create_vehicle(&app, "Toyota Camry", "CAR", 75.0).await["id"].as_i64().unwrap();

    let (status, _) = app
        .post(
            "/api/bookings",
            Some(&jane_token),
            json!({
                "vehicleId": vehicle_id,
                "startDate": "2024-06-01T10:00:00",
                "endDate": "2024-06-03T10:00:00",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let admin = app.admin_token();
    let (status, body) = app.get("/api/users", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    let users = body.unwrap();
    assert_eq!(users[0]["totalBookings"], 1);

    let (status, body) = app.get(&format!("/api/users/{}", jane_id), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["email"], "jane@rentx.com");

    let (status, _) = app.send(Method::GET, "/api/users/999", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
