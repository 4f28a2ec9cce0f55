//! Booking entity: a user's reservation of a vehicle for a time window.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::lifecycle::{transition, BookingStatus, TransitionPolicy};
use crate::errors::{AppError, AppResult};

/// Booking domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Booked vehicle
    pub vehicle_id: i64,
    /// Set once at creation
    pub booking_date: DateTime<Utc>,
    #[schema(value_type = String, example = "2024-06-01T10:00:00")]
    pub start_date: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-03T10:00:00")]
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
}

impl Booking {
    pub fn transition_to(&mut self, target: BookingStatus, policy: TransitionPolicy) -> AppResult<()> {
        self.status = transition(self.status, target, policy)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub booking_date: DateTime<Utc>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub status: BookingStatus,
}

/// Reject windows that end before they start.
pub fn validate_window(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<()> {
    if end < start {
        return Err(AppError::validation("End date must not be before start date"));
    }
    Ok(())
}
