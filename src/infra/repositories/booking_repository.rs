//! Booking repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set, Unchanged,
};

use super::entities::booking::{self, ActiveModel, Entity as BookingEntity};
use super::{into_domain, not_found_on_missing_row};
use crate::domain::{Booking, BookingStatus, NewBooking};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    async fn save(&self, booking: Booking) -> AppResult<Booking>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>>;

    async fn find_all(&self) -> AppResult<Vec<Booking>>;

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Booking>>;

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>>;

    /// Bookings owned by the user; backs the derived `totalBookings`
    async fn count_by_user_id(&self, user_id: i64) -> AppResult<u64>;
}

pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(booking.user_id),
            vehicle_id: Set(booking.vehicle_id),
            booking_date: Set(booking.booking_date),
            start_date: Set(booking.start_date),
            end_date: Set(booking.end_date),
            status: Set(booking.status.as_str().to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Booking::try_from(model)
    }

    async fn save(&self, booking: Booking) -> AppResult<Booking> {
        let active_model = ActiveModel {
            id: Unchanged(booking.id),
            user_id: Set(booking.user_id),
            vehicle_id: Set(booking.vehicle_id),
            booking_date: Set(booking.booking_date),
            start_date: Set(booking.start_date),
            end_date: Set(booking.end_date),
            status: Set(booking.status.as_str().to_string()),
        };

        let model = active_model
            .update(&self.db)
            .await
            .map_err(not_found_on_missing_row)?;
        Booking::try_from(model)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Booking>> {
        BookingEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        into_domain(BookingEntity::find().all(&self.db).await?)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        into_domain(models)
    }

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .filter(booking::Column::Status.eq(status.as_str()))
            .all(&self.db)
            .await?;
        into_domain(models)
    }

    async fn count_by_user_id(&self, user_id: i64) -> AppResult<u64> {
        let count = BookingEntity::find()
            .filter(booking::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
