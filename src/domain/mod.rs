//! Domain layer - Core business entities and their state machines
//!
//! Entities here know nothing about HTTP or the storage engine.
//! Status changes go through `lifecycle::transition` so that the
//! configured `TransitionPolicy` applies uniformly.

pub mod booking;
pub mod lifecycle;
pub mod offer;
pub mod password;
pub mod payment;
pub mod rental;
pub mod user;
pub mod vehicle;

pub use booking::{validate_window, Booking, NewBooking};
pub use lifecycle::{transition, BookingStatus, LifecycleStatus, PaymentStatus, TransitionPolicy};
pub use offer::{NewOffer, Offer};
pub use password::Password;
pub use payment::{NewPayment, Payment, PaymentChanges};
pub use rental::{NewRental, Rental, RentalChanges};
pub use user::{NewUser, User, UserResponse, UserRole};
pub use vehicle::{NewVehicle, Vehicle, VehicleChanges, VehicleType};
