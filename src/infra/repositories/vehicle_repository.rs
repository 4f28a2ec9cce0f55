//! Vehicle repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set, Unchanged,
};

use super::entities::vehicle::{self, ActiveModel, Entity as VehicleEntity};
use super::{into_domain, not_found_on_missing_row};
use crate::domain::{NewVehicle, Vehicle, VehicleType};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a vehicle; it starts available and undamaged
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    /// Overwrite every column of an existing vehicle
    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>>;

    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    /// Fails with `NotFound` when no row was removed
    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn find_by_type(&self, vehicle_type: VehicleType) -> AppResult<Vec<Vehicle>>;

    async fn find_by_available(&self, available: bool) -> AppResult<Vec<Vehicle>>;

    async fn find_by_damaged(&self, damaged: bool) -> AppResult<Vec<Vehicle>>;

    async fn find_by_type_and_available(
        &self,
        vehicle_type: VehicleType,
        available: bool,
    ) -> AppResult<Vec<Vehicle>>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct VehicleStore {
    db: DatabaseConnection,
}

impl VehicleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_where<F>(&self, filter: F) -> AppResult<Vec<Vehicle>>
    where
        F: sea_orm::sea_query::IntoCondition + Send,
    {
        let models = VehicleEntity::find().filter(filter).all(&self.db).await?;
        into_domain(models)
    }
}

#[async_trait]
impl VehicleRepository for VehicleStore {
    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(vehicle.name),
            model: Set(vehicle.model),
            number: Set(vehicle.number),
            rent_cost: Set(vehicle.rent_cost),
            vehicle_type: Set(vehicle.vehicle_type.as_str().to_string()),
            available: Set(true),
            damaged: Set(false),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Vehicle::try_from(model)
    }

    async fn save(&self, vehicle: Vehicle) -> AppResult<Vehicle> {
        let active_model = ActiveModel {
            id: Unchanged(vehicle.id),
            name: Set(vehicle.name),
            model: Set(vehicle.model),
            number: Set(vehicle.number),
            rent_cost: Set(vehicle.rent_cost),
            vehicle_type: Set(vehicle.vehicle_type.as_str().to_string()),
            available: Set(vehicle.available),
            damaged: Set(vehicle.damaged),
        };

        let model = active_model
            .update(&self.db)
            .await
            .map_err(not_found_on_missing_row)?;
        Vehicle::try_from(model)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Vehicle>> {
        VehicleEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Vehicle::try_from)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let models = VehicleEntity::find().all(&self.db).await?;
        into_domain(models)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = VehicleEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn find_by_type(&self, vehicle_type: VehicleType) -> AppResult<Vec<Vehicle>> {
        self.find_where(vehicle::Column::VehicleType.eq(vehicle_type.as_str()))
            .await
    }

    async fn find_by_available(&self, available: bool) -> AppResult<Vec<Vehicle>> {
        self.find_where(vehicle::Column::Available.eq(available)).await
    }

    async fn find_by_damaged(&self, damaged: bool) -> AppResult<Vec<Vehicle>> {
        self.find_where(vehicle::Column::Damaged.eq(damaged)).await
    }

    async fn find_by_type_and_available(
        &self,
        vehicle_type: VehicleType,
        available: bool,
    ) -> AppResult<Vec<Vehicle>> {
        self.find_where(
            vehicle::Column::VehicleType
                .eq(vehicle_type.as_str())
                .and(vehicle::Column::Available.eq(available)),
        )
        .await
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(VehicleEntity::find().count(&self.db).await?)
    }
}
