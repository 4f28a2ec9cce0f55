//! HTTP request handlers.

pub mod auth_handler;
pub mod booking_handler;
pub mod offer_handler;
pub mod payment_handler;
pub mod rental_handler;
pub mod user_handler;
pub mod vehicle_handler;

pub use auth_handler::auth_routes;
pub use booking_handler::booking_routes;
pub use offer_handler::offer_routes;
pub use payment_handler::payment_routes;
pub use rental_handler::rental_routes;
pub use user_handler::user_routes;
pub use vehicle_handler::vehicle_routes;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Money fields may not be negative.
pub(crate) fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative").with_message("must not be negative".into()));
    }
    Ok(())
}
