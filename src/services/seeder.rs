//! Startup data seeding.
//!
//! Every step checks for existing data first, so running the seeder
//! repeatedly never duplicates records.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::config::{SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, SEED_USER_EMAIL, SEED_USER_PASSWORD};
use crate::domain::{NewOffer, NewUser, NewVehicle, Password, UserRole, VehicleType};
use crate::errors::AppResult;
use crate::infra::Storage;

/// What a seeding run created
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub vehicles: usize,
    pub offers: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.users == 0 && self.vehicles == 0 && self.offers == 0
    }
}

pub struct Seeder<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> Seeder<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub async fn run(&self) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        let accounts = [
            (SEED_ADMIN_EMAIL, SEED_ADMIN_PASSWORD, "Admin User", "RentX Headquarters", UserRole::Admin),
            (SEED_USER_EMAIL, SEED_USER_PASSWORD, "John Doe", "123 Main Street, City", UserRole::User),
        ];
        for (email, password, name, address, role) in accounts {
            if self.seed_account(email, password, name, address, role).await? {
                report.users += 1;
            }
        }

        report.vehicles = self.seed_vehicles().await?;
        report.offers = self.seed_offers().await?;

        if report.is_empty() {
            tracing::info!("Seed data already present");
        } else {
            tracing::info!(
                users = report.users,
                vehicles = report.vehicles,
                offers = report.offers,
                "Seed data created"
            );
        }
        Ok(report)
    }

    async fn seed_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
        address: &str,
        role: UserRole,
    ) -> AppResult<bool> {
        let users = self.storage.users();
        if users.find_by_email(email).await?.is_some() {
            return Ok(false);
        }

        users
            .create(NewUser {
                email: email.to_string(),
                password_hash: Password::new(password)?.into_string(),
                name: name.to_string(),
                phone: Some("+91 9876543210".to_string()),
                address: Some(address.to_string()),
                role,
            })
            .await?;
        Ok(true)
    }

    async fn seed_vehicles(&self) -> AppResult<usize> {
        let vehicles = self.storage.vehicles();
        if vehicles.count().await? > 0 {
            return Ok(0);
        }

        let fleet = [
            ("Toyota Camry", "AB123CD", 75, VehicleType::Car, false),
            ("Honda Accord", "EF456GH", 80, VehicleType::Car, true),
            ("Honda CBR", "XY789Z", 40, VehicleType::Bike, false),
            ("Yamaha R1", "PQ456R", 50, VehicleType::Bike, false),
        ];
        for (name, number, cost, vehicle_type, damaged) in fleet {
            let mut vehicle = vehicles
                .create(NewVehicle {
                    name: name.to_string(),
                    model: Some("2023".to_string()),
                    number: Some(number.to_string()),
                    rent_cost: Decimal::from(cost),
                    vehicle_type,
                })
                .await?;
            if damaged {
                vehicle.mark_damaged();
                vehicles.save(vehicle).await?;
            }
        }
        Ok(fleet.len())
    }

    async fn seed_offers(&self) -> AppResult<usize> {
        let offers = self.storage.offers();
        if offers.count().await? > 0 {
            return Ok(0);
        }

        let today = Utc::now().date_naive();
        let catalog = [
            ("New Year Offer", "15%", 30),
            ("Weekend Special", "10%", 15),
            ("First Time User", "20%", 60),
        ];
        for (title, discount, days) in catalog {
            offers
                .create(NewOffer {
                    title: title.to_string(),
                    discount: discount.to_string(),
                    valid_till: Some(today + Duration::days(days)),
                    active: true,
                })
                .await?;
        }
        Ok(catalog.len())
    }
}
