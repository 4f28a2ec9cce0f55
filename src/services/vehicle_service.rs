//! Vehicle service - fleet catalog and the availability/damage state machine.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::domain::{NewVehicle, TransitionPolicy, Vehicle, VehicleChanges, VehicleType};
use crate::errors::{AppResult, OptionExt};
use crate::infra::Storage;

/// Fleet grouped by vehicle type
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct VehicleCatalog {
    pub cars: Vec<Vehicle>,
    pub bikes: Vec<Vehicle>,
}

impl VehicleCatalog {
    fn from_fleet(fleet: Vec<Vehicle>) -> Self {
        let (cars, bikes) = fleet
            .into_iter()
            .partition(|v| v.vehicle_type == VehicleType::Car);
        Self { cars, bikes }
    }
}

#[async_trait]
pub trait VehicleService: Send + Sync {
    async fn catalog(&self) -> AppResult<VehicleCatalog>;

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn get(&self, id: i64) -> AppResult<Vehicle>;

    /// Generic field update; may toggle `available` independently of `damaged`
    /// unless the strict policy is active.
    async fn update(&self, id: i64, changes: VehicleChanges) -> AppResult<Vehicle>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Every vehicle of one type, regardless of state
    async fn by_type(&self, vehicle_type: VehicleType) -> AppResult<Vec<Vehicle>>;

    /// Available vehicles, optionally narrowed to one type
    async fn available(&self, vehicle_type: Option<VehicleType>) -> AppResult<Vec<Vehicle>>;

    async fn damaged(&self) -> AppResult<Vec<Vehicle>>;

    async fn mark_damaged(&self, id: i64) -> AppResult<Vehicle>;

    async fn mark_repaired(&self, id: i64) -> AppResult<Vehicle>;
}

pub struct VehicleManager<S: Storage> {
    storage: Arc<S>,
    policy: TransitionPolicy,
}

impl<S: Storage> VehicleManager<S> {
    pub fn new(storage: Arc<S>, policy: TransitionPolicy) -> Self {
        Self { storage, policy }
    }

    async fn load(&self, id: i64) -> AppResult<Vehicle> {
        self.storage.vehicles().find_by_id(id).await?.ok_or_not_found()
    }
}

#[async_trait]
impl<S: Storage> VehicleService for VehicleManager<S> {
    async fn catalog(&self) -> AppResult<VehicleCatalog> {
        let fleet = self.storage.vehicles().find_all().await?;
        Ok(VehicleCatalog::from_fleet(fleet))
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let created = self.storage.vehicles().create(vehicle).await?;
        tracing::info!(vehicle_id = created.id, "Vehicle added to fleet");
        Ok(created)
    }

    async fn get(&self, id: i64) -> AppResult<Vehicle> {
        self.load(id).await
    }

    async fn update(&self, id: i64, changes: VehicleChanges) -> AppResult<Vehicle> {
        let mut vehicle = self.load(id).await?;
        vehicle.apply(changes, self.policy)?;
        self.storage.vehicles().save(vehicle).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.storage.vehicles().delete(id).await?;
        tracing::info!(vehicle_id = id, "Vehicle removed from fleet");
        Ok(())
    }

    async fn by_type(&self, vehicle_type: VehicleType) -> AppResult<Vec<Vehicle>> {
        self.storage.vehicles().find_by_type(vehicle_type).await
    }

    async fn available(&self, vehicle_type: Option<VehicleType>) -> AppResult<Vec<Vehicle>> {
        match vehicle_type {
            Some(kind) => {
                self.storage
                    .vehicles()
                    .find_by_type_and_available(kind, true)
                    .await
            }
            None => self.storage.vehicles().find_by_available(true).await,
        }
    }

    async fn damaged(&self) -> AppResult<Vec<Vehicle>> {
        self.storage.vehicles().find_by_damaged(true).await
    }

    async fn mark_damaged(&self, id: i64) -> AppResult<Vehicle> {
        let mut vehicle = self.load(id).await?;
        vehicle.mark_damaged();
        tracing::info!(vehicle_id = id, "Vehicle marked damaged");
        self.storage.vehicles().save(vehicle).await
    }

    async fn mark_repaired(&self, id: i64) -> AppResult<Vehicle> {
        let mut vehicle = self.load(id).await?;
        vehicle.mark_repaired();
        tracing::info!(vehicle_id = id, "Vehicle marked repaired");
        self.storage.vehicles().save(vehicle).await
    }
}
