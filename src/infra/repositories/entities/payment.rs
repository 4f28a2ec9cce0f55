//! Payment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Payment, PaymentStatus};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub booking_id: i64,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub payment_date: DateTimeUtc,
    pub status: String,
    pub payment_method: Option<String>,
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
        belongs_to = "super::booking::Entity",
        from = "Column::BookingId",
        to = "super::booking::Column::Id"
    )]
    Booking,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Payment {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let status = model.status.parse::<PaymentStatus>().map_err(|_| {
            AppError::internal(format!("Stored payment status is not recognised: {}", model.status))
        })?;
        Ok(Payment {
            id: model.id,
            user_id: model.user_id,
            booking_id: model.booking_id,
            amount: model.amount,
            payment_date: model.payment_date,
            status,
            payment_method: model.payment_method,
        })
    }
}
