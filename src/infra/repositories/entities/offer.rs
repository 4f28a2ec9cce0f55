//! Offer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Offer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub discount: String,
    pub valid_till: Option<Date>,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Offer {
    fn from(model: Model) -> Self {
        Offer {
            id: model.id,
            title: model.title,
            discount: model.discount,
            valid_till: model.valid_till,
            active: model.active,
        }
    }
}
