//! Storage registry.
//!
//! Hands out one repository of each kind. Services depend on the
//! `Storage` trait only, so tests can swap in mocks or an in-memory engine.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    BookingRepository, BookingStore, OfferRepository, OfferStore, PaymentRepository,
    PaymentStore, RentalRepository, RentalStore, UserRepository, UserStore, VehicleRepository,
    VehicleStore,
};

/// Registry of per-entity repositories
pub trait Storage: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn vehicles(&self) -> Arc<dyn VehicleRepository>;

    fn bookings(&self) -> Arc<dyn BookingRepository>;

    fn rentals(&self) -> Arc<dyn RentalRepository>;

    fn payments(&self) -> Arc<dyn PaymentRepository>;

    fn offers(&self) -> Arc<dyn OfferRepository>;
}

/// SeaORM-backed storage sharing one connection pool across all stores
pub struct Persistence {
    users: Arc<UserStore>,
    vehicles: Arc<VehicleStore>,
    bookings: Arc<BookingStore>,
    rentals: Arc<RentalStore>,
    payments: Arc<PaymentStore>,
    offers: Arc<OfferStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            vehicles: Arc::new(VehicleStore::new(db.clone())),
            bookings: Arc::new(BookingStore::new(db.clone())),
            rentals: Arc::new(RentalStore::new(db.clone())),
            payments: Arc::new(PaymentStore::new(db.clone())),
            offers: Arc::new(OfferStore::new(db)),
        }
    }
}

impl Storage for Persistence {
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
