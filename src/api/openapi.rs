//! OpenAPI document, served as JSON at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, booking_handler, offer_handler, payment_handler, rental_handler, user_handler,
    vehicle_handler,
};
use crate::domain::{
    Booking, BookingStatus, Offer, Payment, PaymentStatus, Rental, UserResponse, Vehicle,
    VehicleType,
};
use crate::services::VehicleCatalog;
use crate::types::{AuthResponse, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RentX API",
        version = "0.1.0",
        description = "Vehicle rental back office: accounts, fleet, bookings, rentals, payments and offers"
    ),
    servers((url = "http://localhost:8080", description = "Local development server")),
    paths(
        auth_handler::register,
        auth_handler::login,
        user_handler::list_users,
        user_handler::get_user,
        vehicle_handler::catalog,
        vehicle_handler::create_vehicle,
        vehicle_handler::available_vehicles,
        vehicle_handler::vehicles_by_type,
        vehicle_handler::damaged_vehicles,
        vehicle_handler::get_vehicle,
        vehicle_handler::update_vehicle,
        vehicle_handler::delete_vehicle,
        vehicle_handler::mark_damaged,
        vehicle_handler::mark_repaired,
        booking_handler::list_bookings,
        booking_handler::create_booking,
        booking_handler::get_booking,
        booking_handler::bookings_by_user,
        booking_handler::bookings_by_status,
        booking_handler::confirm_booking,
        booking_handler::reject_booking,
        booking_handler::complete_booking,
        rental_handler::list_rentals,
        rental_handler::create_rental,
        rental_handler::get_rental,
        rental_handler::update_rental,
        rental_handler::delete_rental,
        rental_handler::confirm_rental,
        rental_handler::reject_rental,
        rental_handler::complete_rental,
        rental_handler::rentals_by_status,
        rental_handler::pending_rentals,
        rental_handler::rentals_by_user,
        rental_handler::rentals_by_vehicle,
        payment_handler::list_payments,
        payment_handler::create_payment,
        payment_handler::get_payment,
        payment_handler::update_payment,
        payment_handler::delete_payment,
        payment_handler::approve_payment,
        payment_handler::reject_payment,
        payment_handler::payments_by_status,
        payment_handler::payments_by_user,
        offer_handler::active_offers,
        offer_handler::create_offer,
    ),
    components(
        schemas(
            UserResponse,
            Vehicle,
            VehicleType,
            VehicleCatalog,
            Booking,
            BookingStatus,
            Rental,
            Payment,
            PaymentStatus,
            Offer,
            AuthResponse,
            HealthResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            vehicle_handler::CreateVehicleRequest,
            vehicle_handler::UpdateVehicleRequest,
            booking_handler::CreateBookingRequest,
            rental_handler::CreateRentalRequest,
            rental_handler::UpdateRentalRequest,
            payment_handler::CreatePaymentRequest,
            payment_handler::UpdatePaymentRequest,
            offer_handler::CreateOfferRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Account administration"),
        (name = "Vehicles", description = "Fleet catalogue and damage tracking"),
        (name = "Bookings", description = "Vehicle reservations"),
        (name = "Rentals", description = "Rentals with pricing and pickup"),
        (name = "Payments", description = "Payments against bookings"),
        (name = "Offers", description = "Promotional offers")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
