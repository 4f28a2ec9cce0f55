//! Booking database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Booking, BookingStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub booking_date: DateTimeUtc,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id"
    )]
    Vehicle,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Booking {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: model.id,
            user_id: model.user_id,
            vehicle_id: model.vehicle_id,
            booking_date: model.booking_date,
            start_date: model.start_date,
            end_date: model.end_date,
            status: stored_status(&model.status)?,
        })
    }
}

fn stored_status(raw: &str) -> Result<BookingStatus, AppError> {
    raw.parse()
        .map_err(|_| AppError::internal(format!("Stored booking status is not recognised: {}", raw)))
}
