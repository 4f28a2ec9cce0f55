//! Infrastructure layer - storage engine integration
//!
//! - Database connection and migrations
//! - Per-entity repositories
//! - The `Storage` registry services are built on

pub mod db;
pub mod repositories;
pub mod storage;

pub use db::{Database, Migrator};
pub use repositories::{
    BookingRepository, OfferRepository, PaymentRepository, RentalRepository, UserRepository,
    VehicleRepository,
};
pub use storage::{Persistence, Storage};
