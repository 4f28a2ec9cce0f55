//! Vehicle database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Vehicle, VehicleType};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub model: Option<String>,
    #[sea_orm(unique)]
    pub number: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub rent_cost: Decimal,
    pub vehicle_type: String,
    pub available: bool,
    pub damaged: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Vehicle {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Vehicle {
            id: model.id,
            name: model.name,
            model: model.model,
            number: model.number,
            rent_cost: model.rent_cost,
            vehicle_type: model
                .vehicle_type
                .parse::<VehicleType>()
                .map_err(|_| AppError::internal(format!("Stored vehicle type is not recognised: {}", model.vehicle_type)))?,
            available: model.available,
            damaged: model.damaged,
        })
    }
}
