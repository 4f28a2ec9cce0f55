//! Vehicle entity and its availability/damage state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::lifecycle::TransitionPolicy;
use crate::errors::{AppError, AppResult};

/// Kind of vehicle in the fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleType {
    Car,
    Bike,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "CAR",
            VehicleType::Bike => "BIKE",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleType::Car),
            "BIKE" => Ok(VehicleType::Bike),
            other => Err(AppError::validation(format!("Unknown vehicle type: {}", other))),
        }
    }
}

/// Vehicle domain entity
///
/// `available` and `damaged` are independent columns. `mark_damaged` and
/// `mark_repaired` keep them consistent; a generic update may not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    #[schema(example = "Toyota Camry")]
    pub name: String,
    #[schema(example = "2023")]
    pub model: Option<String>,
    /// Plate number, unique across the fleet
    #[schema(example = "AB123CD")]
    pub number: Option<String>,
    #[schema(value_type = f64, example = 75)]
    pub rent_cost: Decimal,
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub available: bool,
    pub damaged: bool,
}

impl Vehicle {
    /// Take the vehicle out of service.
    pub fn mark_damaged(&mut self) {
        self.damaged = true;
        self.available = false;
    }

    /// Put the vehicle back into service.
    pub fn mark_repaired(&mut self) {
        self.damaged = false;
        self.available = true;
    }

    /// Apply a field-level update.
    ///
    /// Under the strict policy the result may not be both available and damaged.
    pub fn apply(&mut self, changes: VehicleChanges, policy: TransitionPolicy) -> AppResult<()> {
        let available = changes.available.unwrap_or(self.available);
        let damaged = changes.damaged.unwrap_or(self.damaged);
        if policy.is_strict() && available && damaged {
            return Err(AppError::invalid_transition(
                "damaged",
                "available while damaged",
            ));
        }

        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(model) = changes.model {
            self.model = Some(model);
        }
        if let Some(number) = changes.number {
            self.number = Some(number);
        }
        if let Some(rent_cost) = changes.rent_cost {
            self.rent_cost = rent_cost;
        }
        if let Some(vehicle_type) = changes.vehicle_type {
            self.vehicle_type = vehicle_type;
        }
        self.available = available;
        self.damaged = damaged;
        Ok(())
    }
}

/// Data for a vehicle entering the fleet; always starts available and undamaged
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub model: Option<String>,
    pub number: Option<String>,
    pub rent_cost: Decimal,
    pub vehicle_type: VehicleType,
}

/// Field-level vehicle update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct VehicleChanges {
    pub name: Option<String>,
    pub model: Option<String>,
    pub number: Option<String>,
    pub rent_cost: Option<Decimal>,
    pub vehicle_type: Option<VehicleType>,
    pub available: Option<bool>,
    pub damaged: Option<bool>,
}
