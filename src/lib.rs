//! RentX - vehicle rental back office API
//!
//! Account registration and login with role-bearing session tokens, and
//! the fleet, booking, rental, payment and offer resources behind them.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities, status lifecycles and password hashing
//! - **services**: Use cases, token issuance and the authorization gate
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, middleware, extractors and routes
//! - **types**: Shared response bodies
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (seeds default data unless SEED_ON_STARTUP=false)
//! cargo run -- serve --port 8080
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Insert the default accounts, vehicles and offers
//! cargo run -- seed
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
