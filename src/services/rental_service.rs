//! Rental service.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{
    validate_window, BookingStatus, LifecycleStatus, NewRental, Rental, RentalChanges,
    TransitionPolicy,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Storage;

/// Rental request after validation
#[derive(Debug, Clone)]
pub struct RentalDraft {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub total_cost: Option<Decimal>,
    pub pickup_location: Option<String>,
    /// Defaults to PENDING
    pub status: Option<BookingStatus>,
}

#[async_trait]
pub trait RentalService: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Rental>>;

    async fn create(&self, draft: RentalDraft) -> AppResult<Rental>;

    async fn get(&self, id: i64) -> AppResult<Rental>;

    async fn update(&self, id: i64, changes: RentalChanges) -> AppResult<Rental>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn transition(&self, id: i64, target: BookingStatus) -> AppResult<Rental>;

    async fn list_by_status(&self, status: BookingStatus) -> AppResult<Vec<Rental>>;

    /// PENDING rentals, most recently booked first
    async fn list_pending(&self) -> AppResult<Vec<Rental>>;

    /// A user's rentals, optionally only those in one status
    async fn list_by_user(
        &self,
        user_id: i64,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Rental>>;

    async fn list_by_vehicle(&self, vehicle_id: i64) -> AppResult<Vec<Rental>>;
}

pub struct RentalManager<S: Storage> {
    storage: Arc<S>,
    policy: TransitionPolicy,
}

impl<S: Storage> RentalManager<S> {
    pub fn new(storage: Arc<S>, policy: TransitionPolicy) -> Self {
        Self { storage, policy }
    }
}

#[async_trait]
impl<S: Storage> RentalService for RentalManager<S> {
    async fn list_all(&self) -> AppResult<Vec<Rental>> {
        self.storage.rentals().find_all().await
    }

    async fn create(&self, draft: RentalDraft) -> AppResult<Rental> {
        validate_window(draft.start_date, draft.end_date)?;

        let status = match draft.status {
            Some(status) if self.policy.is_strict() && status != BookingStatus::INITIAL => {
                return Err(AppError::invalid_transition(BookingStatus::INITIAL, status));
            }
            Some(status) => status,
            None => BookingStatus::INITIAL,
        };

        let rental = self
            .storage
            .rentals()
            .create(NewRental {
                user_id: draft.user_id,
                vehicle_id: draft.vehicle_id,
                booking_date: Utc::now(),
                start_date: draft.start_date,
                end_date: draft.end_date,
                total_cost: draft.total_cost,
                pickup_location: draft.pickup_location,
                status,
            })
            .await?;

        tracing::info!(rental_id = rental.id, status = %rental.status, "Rental created");
        Ok(rental)
    }

    async fn get(&self, id: i64) -> AppResult<Rental> {
        self.storage.rentals().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update(&self, id: i64, changes: RentalChanges) -> AppResult<Rental> {
        let mut rental = self.get(id).await?;
        rental.apply(changes, self.policy)?;
        self.storage.rentals().save(rental).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.storage.rentals().delete(id).await?;
        tracing::info!(rental_id = id, "Rental deleted");
        Ok(())
    }

    async fn transition(&self, id: i64, target: BookingStatus) -> AppResult<Rental> {
        let mut rental = self.get(id).await?;
        let from = rental.status;
        rental.transition_to(target, self.policy)?;
        let saved = self.storage.rentals().save(rental).await?;
        tracing::info!(rental_id = id, from = %from, to = %target, "Rental status changed");
        Ok(saved)
    }

    async fn list_by_status(&self, status: BookingStatus) -> AppResult<Vec<Rental>> {
        self.storage.rentals().find_by_status(status).await
    }

    async fn list_pending(&self) -> AppResult<Vec<Rental>> {
        self.storage
            .rentals()
            .find_by_status_newest_first(BookingStatus::Pending)
            .await
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<Rental>> {
        let rentals = self.storage.rentals();
        match status {
            Some(status) => rentals.find_by_user_id_and_status(user_id, status).await,
            None => rentals.find_by_user_id(user_id).await,
        }
    }

    async fn list_by_vehicle(&self, vehicle_id: i64) -> AppResult<Vec<Rental>> {
        self.storage.rentals().find_by_vehicle_id(vehicle_id).await
    }
}
