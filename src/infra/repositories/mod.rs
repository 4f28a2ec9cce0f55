//! Repository layer - Data access abstraction
//!
//! One narrow trait per entity, each with a SeaORM-backed `*Store`.

pub(crate) mod entities;
mod booking_repository;
mod offer_repository;
mod payment_repository;
mod rental_repository;
mod user_repository;
mod vehicle_repository;

use sea_orm::DbErr;

use crate::errors::{AppError, AppResult};

pub use booking_repository::{BookingRepository, BookingStore};
pub use offer_repository::{OfferRepository, OfferStore};
pub use payment_repository::{PaymentRepository, PaymentStore};
pub use rental_repository::{RentalRepository, RentalStore};
pub use user_repository::{UserRepository, UserStore};
pub use vehicle_repository::{VehicleRepository, VehicleStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use booking_repository::MockBookingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use offer_repository::MockOfferRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use rental_repository::MockRentalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use vehicle_repository::MockVehicleRepository;

/// Convert a batch of rows into domain entities, failing on the first bad row.
pub(crate) fn into_domain<M, T>(models: Vec<M>) -> AppResult<Vec<T>>
where
    T: TryFrom<M, Error = AppError>,
{
    models.into_iter().map(T::try_from).collect()
}

/// An update that matched no row means the entity is gone.
pub(crate) fn not_found_on_missing_row(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotUpdated => AppError::NotFound,
        other => AppError::from(other),
    }
}
