//! Offer repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use super::entities::offer::{self, ActiveModel, Entity as OfferEntity};
use crate::domain::{NewOffer, Offer};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn create(&self, offer: NewOffer) -> AppResult<Offer>;

    async fn find_by_active(&self, active: bool) -> AppResult<Vec<Offer>>;

    async fn count(&self) -> AppResult<u64>;
}

pub struct OfferStore {
    db: DatabaseConnection,
}

impl OfferStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OfferRepository for OfferStore {
    async fn create(&self, offer: NewOffer) -> AppResult<Offer> {
        let active_model = ActiveModel {
            id: NotSet,
            title: Set(offer.title),
            discount: Set(offer.discount),
            valid_till: Set(offer.valid_till),
            active: Set(offer.active),
        };

        Ok(Offer::from(active_model.insert(&self.db).await?))
    }

    async fn find_by_active(&self, active: bool) -> AppResult<Vec<Offer>> {
        let models = OfferEntity::find()
            .filter(offer::Column::Active.eq(active))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Offer::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(OfferEntity::find().count(&self.db).await?)
    }
}
