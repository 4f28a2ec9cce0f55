//! Application services layer - use cases over the storage registry.
//!
//! Each service is a trait plus a `*Manager` generic over `Storage`, so
//! handlers depend on the trait and tests can substitute the storage.

mod auth_service;
pub mod authorization;
mod booking_service;
pub mod container;
mod offer_service;
mod payment_service;
mod rental_service;
pub mod seeder;
pub mod token_service;
mod user_service;
mod vehicle_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, AuthSession, Authenticator, Credentials, Registration};
pub use authorization::{AuthorizationGate, CurrentUser};
pub use booking_service::{BookingDraft, BookingManager, BookingService};
pub use offer_service::{OfferManager, OfferService};
pub use payment_service::{PaymentDraft, PaymentManager, PaymentService};
pub use rental_service::{RentalDraft, RentalManager, RentalService};
pub use seeder::{SeedReport, Seeder};
pub use token_service::{Claims, Identity, IssuedToken, TokenService, TokenStatus};
pub use user_service::{UserManager, UserService};
pub use vehicle_service::{VehicleCatalog, VehicleManager, VehicleService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
