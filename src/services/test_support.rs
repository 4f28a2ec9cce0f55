//! Mock-backed `Storage` for service unit tests.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{Booking, BookingStatus, User, UserRole, Vehicle, VehicleType};
use crate::infra::repositories::{
    MockBookingRepository, MockOfferRepository, MockPaymentRepository, MockRentalRepository,
    MockUserRepository, MockVehicleRepository,
};
use crate::infra::{
    BookingRepository, OfferRepository, PaymentRepository, RentalRepository, Storage,
    UserRepository, VehicleRepository,
};

/// Storage whose repositories are mockall mocks. Repositories not
/// replaced through a `with_*` call have no expectations and panic if used.
pub struct TestStorage {
    users: Arc<dyn UserRepository>,
    vehicles: Arc<dyn VehicleRepository>,
    bookings: Arc<dyn BookingRepository>,
    rentals: Arc<dyn RentalRepository>,
    payments: Arc<dyn PaymentRepository>,
    offers: Arc<dyn OfferRepository>,
}

impl TestStorage {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            vehicles: Arc::new(MockVehicleRepository::new()),
            bookings: Arc::new(MockBookingRepository::new()),
            rentals: Arc::new(MockRentalRepository::new()),
            payments: Arc::new(MockPaymentRepository::new()),
            offers: Arc::new(MockOfferRepository::new()),
        }
    }

    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_vehicles(mut self, repo: MockVehicleRepository) -> Self {
        self.vehicles = Arc::new(repo);
        self
    }

    pub fn with_bookings(mut self, repo: MockBookingRepository) -> Self {
        self.bookings = Arc::new(repo);
        self
    }

    pub fn with_rentals(mut self, repo: MockRentalRepository) -> Self {
        self.rentals = Arc::new(repo);
        self
    }

    pub fn with_payments(mut self, repo: MockPaymentRepository) -> Self {
        self.payments = Arc::new(repo);
        self
    }

    pub fn with_offers(mut self, repo: MockOfferRepository) -> Self {
        self.offers = Arc::new(repo);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Storage for TestStorage {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn vehicles(&self) -> Arc<dyn VehicleRepository> {
        self.vehicles.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        self.bookings.clone()
    }

    fn rentals(&self) -> Arc<dyn RentalRepository> {
        self.rentals.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    fn offers(&self) -> Arc<dyn OfferRepository> {
        self.offers.clone()
    }
}

pub fn user_fixture(id: i64, role: UserRole, password_hash: &str) -> User {
    User {
        id,
        email: format!("user{}@rentx.com", id),
        password_hash: password_hash.to_string(),
        name: "Test User".to_string(),
        phone: None,
        address: None,
        role,
        join_date: Utc::now(),
    }
}

pub fn vehicle_fixture(id: i64) -> Vehicle {
    Vehicle {
        id,
        name: "Toyota Camry".to_string(),
        model: Some("2023".to_string()),
        number: Some(format!("AB{:03}CD", id)),
        rent_cost: Decimal::from(75),
        vehicle_type: VehicleType::Car,
        available: true,
        damaged: false,
    }
}

pub fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, d)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap_or_default()
}

pub fn booking_fixture(id: i64, user_id: i64, status: BookingStatus) -> Booking {
    Booking {
        id,
        user_id,
        vehicle_id: 1,
        booking_date: Utc::now(),
        start_date: day(1),
        end_date: day(3),
        status,
    }
}
