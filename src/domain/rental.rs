//! Rental entity.
//!
//! Parallel to `Booking` but holds the user and vehicle as plain
//! identifiers, and carries pricing and pickup details.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::booking::validate_window;
use super::lifecycle::{transition, BookingStatus, TransitionPolicy};
use crate::errors::AppResult;

/// Rental domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub booking_date: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T10:00:00")]
    pub start_date: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-03T10:00:00")]
    pub end_date: NaiveDateTime,
    #[schema(value_type = Option<f64>, example = 150)]
    pub total_cost: Option<Decimal>,
    pub pickup_location: Option<String>,
    pub status: BookingStatus,
}

impl Rental {
    pub fn transition_to(&mut self, target: BookingStatus, policy: TransitionPolicy) -> AppResult<()> {
        self.status = transition(self.status, target, policy)?;
        Ok(())
    }

    /// Apply a generic update. A status carried in the update goes through
    /// the same transition check as the named operations.
    pub fn apply(&mut self, changes: RentalChanges, policy: TransitionPolicy) -> AppResult<()> {
        let start = changes.start_date.unwrap_or(self.start_date);
        let end = changes.end_date.unwrap_or(self.end_date);
        validate_window(start, end)?;

        let status = match changes.status {
            Some(target) if target != self.status => {
                transition(self.status, target, policy)?
            }
            _ => self.status,
        };

        self.start_date = start;
        self.end_date = end;
        if let Some(total_cost) = changes.total_cost {
            self.total_cost = Some(total_cost);
        }
        if let Some(pickup_location) = changes.pickup_location {
            self.pickup_location = Some(pickup_location);
        }
        self.status = status;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewRental {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub booking_date: DateTime<Utc>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_cost: Option<Decimal>,
    pub pickup_location: Option<String>,
    pub status: BookingStatus,
}

/// Field-level rental update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct RentalChanges {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub total_cost: Option<Decimal>,
    pub status: Option<BookingStatus>,
    pub pickup_location: Option<String>,
}
