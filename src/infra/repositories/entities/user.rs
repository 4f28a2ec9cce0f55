//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub join_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for User {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&model.role)
            .ok_or_else(|| AppError::internal(format!("Stored role is not recognised: {}", model.role)))?;
        Ok(User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            phone: model.phone,
            address: model.address,
            role,
            join_date: model.join_date,
        })
    }
}
