//! Rental repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, Unchanged,
};

use super::entities::rental::{self, ActiveModel, Entity as RentalEntity};
use super::{into_domain, not_found_on_missing_row};
use crate::domain::{BookingStatus, NewRental, Rental};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn create(&self, rental: NewRental) -> AppResult<Rental>;

    async fn save(&self, rental: Rental) -> AppResult<Rental>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Rental>>;

    async fn find_all(&self) -> AppResult<Vec<Rental>>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Rental>>;

    /// Same filter as `find_by_status`, most recently booked first (ties: newest id)
    async fn find_by_status_newest_first(&self, status: BookingStatus) -> AppResult<Vec<Rental>>;

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Rental>>;

    async fn find_by_vehicle_id(&self, vehicle_id: i64) -> AppResult<Vec<Rental>>;

    async fn find_by_user_id_and_status(
        &self,
        user_id: i64,
        status: BookingStatus,
    ) -> AppResult<Vec<Rental>>;
}

pub struct RentalStore {
    db: DatabaseConnection,
}

impl RentalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_where(&self, condition: Condition) -> AppResult<Vec<Rental>> {
        let models = RentalEntity::find().filter(condition).all(&self.db).await?;
        into_domain(models)
    }
}

#[async_trait]
impl RentalRepository for RentalStore {
    async fn create(&self, rental: NewRental) -> AppResult<Rental> {
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(rental.user_id),
            vehicle_id: Set(rental.vehicle_id),
            booking_date: Set(rental.booking_date),
            start_date: Set(rental.start_date),
            end_date: Set(rental.end_date),
            total_cost: Set(rental.total_cost),
            pickup_location: Set(rental.pickup_location),
            status: Set(rental.status.as_str().to_string()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Rental::try_from(model)
    }

    async fn save(&self, rental: Rental) -> AppResult<Rental> {
        let active_model = ActiveModel {
            id: Unchanged(rental.id),
            user_id: Set(rental.user_id),
            vehicle_id: Set(rental.vehicle_id),
            booking_date: Set(rental.booking_date),
            start_date: Set(rental.start_date),
            end_date: Set(rental.end_date),
            total_cost: Set(rental.total_cost),
            pickup_location: Set(rental.pickup_location),
            status: Set(rental.status.as_str().to_string()),
        };

        let model = active_model
            .update(&self.db)
            .await
            .map_err(not_found_on_missing_row)?;
        Rental::try_from(model)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Rental>> {
        RentalEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Rental::try_from)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Rental>> {
        into_domain(RentalEntity::find().all(&self.db).await?)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = RentalEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn find_by_status(&self, status: BookingStatus) -> AppResult<Vec<Rental>> {
        self.find_where(Condition::all().add(rental::Column::Status.eq(status.as_str())))
            .await
    }

    async fn find_by_status_newest_first(&self, status: BookingStatus) -> AppResult<Vec<Rental>> {
        let models = RentalEntity::find()
            .filter(rental::Column::Status.eq(status.as_str()))
            .order_by_desc(rental::Column::BookingDate)
            .order_by_desc(rental::Column::Id)
            .all(&self.db)
            .await?;
        into_domain(models)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Rental>> {
        self.find_where(Condition::all().add(rental::Column::UserId.eq(user_id)))
            .await
    }

    async fn find_by_vehicle_id(&self, vehicle_id: i64) -> AppResult<Vec<Rental>> {
        self.find_where(Condition::all().add(rental::Column::VehicleId.eq(vehicle_id)))
            .await
    }

    async fn find_by_user_id_and_status(
        &self,
        user_id: i64,
        status: BookingStatus,
    ) -> AppResult<Vec<Rental>> {
        self.find_where(
            Condition::all()
                .add(rental::Column::UserId.eq(user_id))
                .add(rental::Column::Status.eq(status.as_str())),
        )
        .await
    }
}
