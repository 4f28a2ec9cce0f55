//! Shared response types.

mod response;

pub use response::{AuthResponse, Deleted, HealthResponse};
