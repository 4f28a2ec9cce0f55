//! Rental database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{BookingStatus, Rental};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rentals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub booking_date: DateTimeUtc,
    pub start_date: DateTime,
    pub end_date: DateTime,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub total_cost: Option<Decimal>,
    pub pickup_location: Option<String>,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Rental {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse::<BookingStatus>().map_err(|_| {
            AppError::internal(format!("Stored rental status is not recognised: {}", model.status))
        })?;
        Ok(Rental {
            id: model.id,
            user_id: model.user_id,
            vehicle_id: model.vehicle_id,
            booking_date: model.booking_date,
            start_date: model.start_date,
            end_date: model.end_date,
            total_cost: model.total_cost,
            pickup_location: model.pickup_location,
            status,
        })
    }
}
