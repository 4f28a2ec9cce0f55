//! Service Container - one place to reach every application service.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, AuthorizationGate, BookingManager, BookingService, OfferManager,
    OfferService, PaymentManager, PaymentService, RentalManager, RentalService, TokenService,
    UserManager, UserService, VehicleManager, VehicleService,
};
use crate::config::Config;
use crate::infra::{Persistence, Storage};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn vehicles(&self) -> Arc<dyn VehicleService>;

    fn bookings(&self) -> Arc<dyn BookingService>;

    fn rentals(&self) -> Arc<dyn RentalService>;

    fn payments(&self) -> Arc<dyn PaymentService>;

    fn offers(&self) -> Arc<dyn OfferService>;

    /// Token check used by the HTTP extractors
    fn gate(&self) -> AuthorizationGate;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth: Arc<dyn AuthService>,
    users: Arc<dyn UserService>,
    vehicles: Arc<dyn VehicleService>,
    bookings: Arc<dyn BookingService>,
    rentals: Arc<dyn RentalService>,
    payments: Arc<dyn PaymentService>,
    offers: Arc<dyn OfferService>,
    gate: AuthorizationGate,
}

impl Services {
    /// Wire every service over one storage registry.
    pub fn from_storage<S: Storage + 'static>(storage: Arc<S>, config: &Config) -> Self {
        let tokens = TokenService::new(&config.signing_key, config.jwt_expiration_hours);
        let policy = config.transition_policy;

        Self {
            auth: Arc::new(Authenticator::new(storage.clone(), tokens.clone())),
            users: Arc::new(UserManager::new(storage.clone())),
            vehicles: Arc::new(VehicleManager::new(storage.clone(), policy)),
            bookings: Arc::new(BookingManager::new(storage.clone(), policy)),
            rentals: Arc::new(RentalManager::new(storage.clone(), policy)),
            payments: Arc::new(PaymentManager::new(storage.clone(), policy)),
            offers: Arc::new(OfferManager::new(storage)),
            gate: AuthorizationGate::new(tokens),
        }
    }

    /// Wire every service over the SeaORM storage engine.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        Self::from_storage(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    fn vehicles(&self) -> Arc<dyn VehicleService> {
        self.vehicles.clone()
    }

    fn bookings(&self) -> Arc<dyn BookingService> {
        self.bookings.clone()
    }

    fn rentals(&self) -> Arc<dyn RentalService> {
        self.rentals.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentService> {
        self.payments.clone()
    }

    fn offers(&self) -> Arc<dyn OfferService> {
        self.offers.clone()
    }

    fn gate(&self) -> AuthorizationGate {
        self.gate.clone()
    }
}
