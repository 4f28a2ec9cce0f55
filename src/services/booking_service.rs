//! Booking service.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::sync::Arc;

use crate::domain::{validate_window, Booking, BookingStatus, LifecycleStatus, NewBooking, TransitionPolicy};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Storage;

/// Booking request after validation
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Booking>>;

    /// Create a PENDING booking. The user and vehicle must exist.
    async fn create(&self, draft: BookingDraft) -> AppResult<Booking>;

    async fn get(&self, id: i64) -> AppResult<Booking>;

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Booking>>;

    async fn list_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>>;

    /// Move a booking to `target` (confirm, reject or complete).
    async fn transition(&self, id: i64, target: BookingStatus) -> AppResult<Booking>;
}

pub struct BookingManager<S: Storage> {
    storage: Arc<S>,
    policy: TransitionPolicy,
}

impl<S: Storage> BookingManager<S> {
    pub fn new(storage: Arc<S>, policy: TransitionPolicy) -> Self {
        Self { storage, policy }
    }
}

#[async_trait]
impl<S: Storage> BookingService for BookingManager<S> {
    async fn list_all(&self) -> AppResult<Vec<Booking>> {
        self.storage.bookings().find_all().await
    }

    async fn create(&self, draft: BookingDraft) -> AppResult<Booking> {
        validate_window(draft.start_date, draft.end_date)?;

        if self.storage.users().find_by_id(draft.user_id).await?.is_none() {
            return Err(AppError::validation("Referenced user does not exist"));
        }
        if self.storage.vehicles().find_by_id(draft.vehicle_id).await?.is_none() {
            return Err(AppError::validation("Referenced vehicle does not exist"));
        }

        let booking = self
            .storage
            .bookings()
            .create(NewBooking {
                user_id: draft.user_id,
                vehicle_id: draft.vehicle_id,
                booking_date: Utc::now(),
                start_date: draft.start_date,
                end_date: draft.end_date,
                status: BookingStatus::INITIAL,
            })
            .await?;

        tracing::info!(booking_id = booking.id, user_id = booking.user_id, "Booking created");
        Ok(booking)
    }

    async fn get(&self, id: i64) -> AppResult<Booking> {
        self.storage.bookings().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Booking>> {
        self.storage.bookings().find_by_user_id(user_id).await
    }

    async fn list_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        self.storage.bookings().find_by_status(status).await
    }

    async fn transition(&self, id: i64, target: BookingStatus) -> AppResult<Booking> {
        let mut booking = self.get(id).await?;
        let from = booking.status;
        booking.transition_to(target, self.policy)?;
        let saved = self.storage.bookings().save(booking).await?;
        tracing::info!(booking_id = id, from = %from, to = %target, "Booking status changed");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infra::repositories::{MockBookingRepository, MockUserRepository, MockVehicleRepository};
    use crate::services::test_support::{booking_fixture, day, user_fixture, vehicle_fixture, TestStorage};

    fn draft() -> BookingDraft {
        BookingDraft {
            user_id: 2,
            vehicle_id: 1,
            start_date: day(1),
            end_date: day(4),
        }
    }

    fn users_present() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_fixture(id, UserRole::User, "h"))));
        users
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_by_id()
            .returning(|id| Ok(Some(vehicle_fixture(id))));
        let mut bookings = MockBookingRepository::new();
        bookings.expect_create().times(1).returning(|new| {
            assert_eq!(new.status, BookingStatus::Pending);
            Ok(Booking {
                id: 1,
                user_id: new.user_id,
                vehicle_id: new.vehicle_id,
                booking_date: new.booking_date,
                start_date: new.start_date,
                end_date: new.end_date,
                status: new.status,
            })
        });

        let storage = TestStorage::new()
            .with_users(users_present())
            .with_vehicles(vehicles)
            .with_bookings(bookings)
            .shared();
        let booking = BookingManager::new(storage, TransitionPolicy::Permissive)
            .create(draft())
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_requires_existing_vehicle() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles.expect_find_by_id().returning(|_| Ok(None));
        let mut bookings = MockBookingRepository::new();
        bookings.expect_create().never();

        let storage = TestStorage::new()
            .with_users(users_present())
            .with_vehicles(vehicles)
            .with_bookings(bookings)
            .shared();
        let result = BookingManager::new(storage, TransitionPolicy::Permissive)
            .create(draft())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_transition_missing_booking() {
        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(|_| Ok(None));

        let manager = BookingManager::new(
            TestStorage::new().with_bookings(bookings).shared(),
            TransitionPolicy::Permissive,
        );
        let result = manager.transition(9, BookingStatus::Confirmed).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_permissive_transition_always_overwrites() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|id| Ok(Some(booking_fixture(id, 2, BookingStatus::Completed))));
        bookings.expect_save().returning(Ok);

        let manager = BookingManager::new(
            TestStorage::new().with_bookings(bookings).shared(),
            TransitionPolicy::Permissive,
        );
        let booking = manager.transition(3, BookingStatus::Rejected).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Rejected);
    }

    #[tokio::test]
    async fn test_strict_transition_refuses_completing_pending() {
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|id| Ok(Some(booking_fixture(id, 2, BookingStatus::Pending))));
        bookings.expect_save().never();

        let manager = BookingManager::new(
            TestStorage::new().with_bookings(bookings).shared(),
            TransitionPolicy::Strict,
        );
        let result = manager.transition(3, BookingStatus::Completed).await;
        assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
    }
}
