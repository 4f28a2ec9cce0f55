//! Shared fixtures for integration tests.
//!
//! `MemoryStorage` keeps every table in a `Vec` behind one mutex, so the
//! full service stack and router run without a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use rentx_api::api::{create_router, AppState};
use rentx_api::config::{Config, SigningKey};
use rentx_api::domain::{
    Booking, BookingStatus, NewBooking, NewOffer, NewPayment, NewRental, NewUser, NewVehicle,
    Offer, Payment, PaymentStatus, Rental, TransitionPolicy, User, UserRole, Vehicle, VehicleType,
};
use rentx_api::errors::{AppError, AppResult};
use rentx_api::infra::{
    BookingRepository, OfferRepository, PaymentRepository, RentalRepository, Storage,
    UserRepository, VehicleRepository,
};
use rentx_api::services::{Identity, Services, TokenService};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    vehicles: Vec<Vehicle>,
    bookings: Vec<Booking>,
    rentals: Vec<Rental>,
    payments: Vec<Payment>,
    offers: Vec<Offer>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory storage engine; clones share the same tables
#[derive(Clone, Default)]
pub struct MemoryStorage {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut tables = self.tables.lock().unwrap();
        f(&mut tables)
    }

    pub fn user_count(&self) -> usize {
        self.with(|t| t.users.len())
    }
}

impl Storage for MemoryStorage {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.clone())
    }

    fn vehicles(&self) -> Arc<dyn VehicleRepository> {
        Arc::new(self.clone())
    }

    fn bookings(&self) -> Arc<dyn BookingRepository> {
        Arc::new(self.clone())
    }

    fn rentals(&self) -> Arc<dyn RentalRepository> {
        Arc::new(self.clone())
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        Arc::new(self.clone())
    }

    fn offers(&self) -> Arc<dyn OfferRepository> {
        Arc::new(self.clone())
    }
}

fn replace<T: Clone>(rows: &mut [T], id_of: impl Fn(&T) -> i64, row: T) -> AppResult<T> {
    let id = id_of(&row);
    let slot = rows.iter_mut().find(|r| id_of(&**r) == id).ok_or(AppError::NotFound)?;
    *slot = row.clone();
    Ok(row)
}

fn remove<T>(rows: &mut Vec<T>, id_of: impl Fn(&T) -> i64, id: i64) -> AppResult<()> {
    let before = rows.len();
    rows.retain(|r| id_of(r) != id);
    if rows.len() == before {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn select<T: Clone>(rows: &[T], pred: impl Fn(&T) -> bool) -> Vec<T> {
    rows.iter().filter(|r| pred(r)).cloned().collect()
}

#[async_trait]
impl UserRepository for MemoryStorage {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        self.with(|t| {
            if t.users.iter().any(|u| u.email == user.email) {
                return Err(AppError::internal("duplicate email"));
            }
            let user = User {
                id: t.next_id(),
                email: user.email,
                password_hash: user.password_hash,
                name: user.name,
                phone: user.phone,
                address: user.address,
                role: user.role,
                join_date: Utc::now(),
            };
            t.users.push(user.clone());
            Ok(user)
        })
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.with(|t| t.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.with(|t| t.users.clone()))
    }
}

#[async_trait]
impl VehicleRepository for MemoryStorage {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        Ok(self.with(|t| {
            let vehicle = Vehicle {
                id: t.next_id(),
                name: vehicle.name,
                model: vehicle.model,
                number: vehicle.number,
                rent_cost: vehicle.rent_cost,
                vehicle_type: vehicle.vehicle_type,
                available: true,
                damaged: false,
            };
            t.vehicles.push(vehicle.clone());
            vehicle
        }))
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        self.with(|t| replace(&mut t.vehicles, |v| v.id, vehicle))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        Ok(self.with(|t| t.vehicles.iter().find(|v| v.id == id).cloned()))
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.with(|t| t.vehicles.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.with(|t| remove(&mut t.vehicles, |v| v.id, id))
    }

    async fn find_by_type(&self, vehicle_type: VehicleType) -> AppResult<Vec<Vehicle>> {
        Ok(self.with(|t| select(&t.vehicles, |v| v.vehicle_type == vehicle_type)))
    }

    async fn find_by_available(&self, available: bool) -> AppResult<Vec<Vehicle>> {
        Ok(self.with(|t| select(&t.vehicles, |v| v.available == available)))
    }

    async fn find_by_damaged(&self, damaged: bool) -> AppResult<Vec<Vehicle>> {
        Ok(self.with(|t| select(&t.vehicles, |v| v.damaged == damaged)))
    }

    async fn find_by_type_and_available(
        &self,
        vehicle_type: VehicleType,
        available: bool,
    ) -> AppResult<Vec<Vehicle>> {
        Ok(self.with(|t| {
            select(&t.vehicles, |v| v.vehicle_type == vehicle_type && v.available == available)
        }))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.with(|t| t.vehicles.len() as u64))
    }
}

#[async_trait]
impl BookingRepository for MemoryStorage {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        Ok(self.with(|t| {
            let booking = Booking {
                id: t.next_id(),
                user_id: booking.user_id,
                vehicle_id: booking.vehicle_id,
                booking_date: booking.booking_date,
                start_date: booking.start_date,
                end_date: booking.end_date,
                status: booking.status,
            };
            t.bookings.push(booking.clone());
            booking
        }))
    }

    async fn save(&self, booking: Booking) -> AppResult<Booking> {
        self.with(|t| replace(&mut t.bookings, |b| b.id, booking))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        Ok(self.with(|t| t.bookings.iter().find(|b| b.id == id).cloned()))
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        Ok(self.with(|t| t.bookings.clone()))
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Booking>> {
        Ok(self.with(|t| select(&t.bookings, |b| b.user_id == user_id)))
    }

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        Ok(self.with(|t| select(&t.bookings, |b| b.status == status)))
    }

    async fn count_by_user_id(&self, user_id: i64) -> AppResult<u64> {
        Ok(self.with(|t| t.bookings.iter().filter(|b| b.user_id == user_id).count() as u64))
    }
}

#[async_trait]
impl RentalRepository for MemoryStorage {
    async fn create(&self, rental: NewRental) -> AppResult<Rental> {
        Ok(self.with(|t| {
            let rental = Rental {
                id: t.next_id(),
                user_id: rental.user_id,
                vehicle_id: rental.vehicle_id,
                booking_date: rental.booking_date,
                start_date: rental.start_date,
                end_date: rental.end_date,
                total_cost: rental.total_cost,
                pickup_location: rental.pickup_location,
                status: rental.status,
            };
            t.rentals.push(rental.clone());
            rental
        }))
    }

    async fn save(&self, rental: Rental) -> AppResult<Rental> {
        self.with(|t| replace(&mut t.rentals, |r| r.id, rental))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Rental>> {
        Ok(self.with(|t| t.rentals.iter().find(|r| r.id == id).cloned()))
    }

    async fn find_all(&self) -> AppResult<Vec<Rental>> {
        Ok(self.with(|t| t.rentals.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.with(|t| remove(&mut t.rentals, |r| r.id, id))
    }

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Rental>> {
        Ok(self.with(|t| select(&t.rentals, |r| r.status == status)))
    }

    async fn find_by_status_newest_first(&self, status: BookingStatus) -> AppResult<Vec<Rental>> {
        let mut rentals = self.with(|t| select(&t.rentals, |r| r.status == status));
        rentals.sort_by(|a, b| (b.booking_date, b.id).cmp(&(a.booking_date, a.id)));
        Ok(rentals)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Rental>> {
        Ok(self.with(|t| select(&t.rentals, |r| r.user_id == user_id)))
    }

    async fn find_by_vehicle_id(&self, vehicle_id: i64) -> AppResult<Vec<Rental>> {
        Ok(self.with(|t| select(&t.rentals, |r| r.vehicle_id == vehicle_id)))
    }

    async fn find_by_user_id_and_status(
        &self,
        user_id: i64,
        status: BookingStatus,
    ) -> AppResult<Vec<Rental>> {
        Ok(self.with(|t| select(&t.rentals, |r| r.user_id == user_id && r.status == status)))
    }
}

#[async_trait]
impl PaymentRepository for MemoryStorage {
    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        Ok(self.with(|t| {
            let payment = Payment {
                id: t.next_id(),
                user_id: payment.user_id,
                booking_id: payment.booking_id,
                amount: payment.amount,
                payment_date: payment.payment_date,
                status: payment.status,
                payment_method: payment.payment_method,
            };
            t.payments.push(payment.clone());
            payment
        }))
    }

    async fn save(&self, payment: Payment) -> AppResult<Payment> {
        self.with(|t| replace(&mut t.payments, |p| p.id, payment))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>> {
        Ok(self.with(|t| t.payments.iter().find(|p| p.id == id).cloned()))
    }

    async fn find_all(&self) -> AppResult<Vec<Payment>> {
        Ok(self.with(|t| t.payments.clone()))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.with(|t| remove(&mut t.payments, |p| p.id, id))
    }

    async fn find_by_status(&self, status: PaymentStatus) -> AppResult<Vec<Payment>> {
        Ok(self.with(|t| select(&t.payments, |p| p.status == status)))
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Payment>> {
        Ok(self.with(|t| select(&t.payments, |p| p.user_id == user_id)))
    }
}

#[async_trait]
impl OfferRepository for MemoryStorage {
    async fn create(&self, offer: NewOffer) -> AppResult<Offer> {
        Ok(self.with(|t| {
            let offer = Offer {
                id: t.next_id(),
                title: offer.title,
                discount: offer.discount,
                valid_till: offer.valid_till,
                active: offer.active,
            };
            t.offers.push(offer.clone());
            offer
        }))
    }

    async fn find_by_active(&self, active: bool) -> AppResult<Vec<Offer>> {
        Ok(self.with(|t| select(&t.offers, |o| o.active == active)))
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.with(|t| t.offers.len() as u64))
    }
}

pub fn test_config(policy: TransitionPolicy) -> Config {
    Config {
        signing_key: SigningKey::from_secret(TEST_SECRET).unwrap(),
        transition_policy: policy,
        ..Config::default()
    }
}

/// Router over a fresh in-memory storage
pub struct TestApp {
    pub router: Router,
    pub storage: MemoryStorage,
    pub tokens: TokenService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config(TransitionPolicy::Permissive))
    }

    pub fn with_config(config: Config) -> Self {
        let storage = MemoryStorage::new();
        let tokens = TokenService::new(&config.signing_key, config.jwt_expiration_hours);
        let services = Services::from_storage(Arc::new(storage.clone()), &config);
        let router = create_router(AppState::new(Arc::new(services), config));
        Self {
            router,
            storage,
            tokens,
        }
    }

    /// Session token for an arbitrary identity, signed with the app's key.
    pub fn token_for(&self, user_id: i64, role: UserRole) -> String {
        let identity = Identity {
            user_id,
            email: format!("user{}@rentx.com", user_id),
        };
        self.tokens.issue(&identity, role).unwrap().token
    }

    pub fn admin_token(&self) -> String {
        self.token_for(1_000, UserRole::Admin)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Option<Value>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).unwrap())
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Option<Value>) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Option<Value>) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Option<Value>) {
        self.send(Method::PUT, uri, token, body).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Option<Value>) {
        self.send(Method::DELETE, uri, token, None).await
    }
}
