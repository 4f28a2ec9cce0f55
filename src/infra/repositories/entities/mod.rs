//! SeaORM entity definitions
//!
//! Database rows are kept separate from the domain models. Rows holding
//! enum columns convert with `TryFrom`, since a stored string may not parse.

pub mod booking;
pub mod offer;
pub mod payment;
pub mod rental;
pub mod user;
pub mod vehicle;
