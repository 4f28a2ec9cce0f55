//! Seed command - Default accounts, vehicles and offers.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{SeedReport, Seeder};

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let report = seed_database(&db).await?;
    println!(
        "users: {}, vehicles: {}, offers: {}",
        report.users, report.vehicles, report.offers
    );
    Ok(())
}

/// Run the idempotent seeder over an open database.
pub async fn seed_database(db: &Database) -> AppResult<SeedReport> {
    let storage = Arc::new(Persistence::new(db.get_connection()));
    Seeder::new(storage).run().await
}
