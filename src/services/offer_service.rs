//! Offer service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewOffer, Offer};
use crate::errors::AppResult;
use crate::infra::Storage;

#[async_trait]
pub trait OfferService: Send + Sync {
    /// Offers currently flagged active
    async fn list_active(&self) -> AppResult<Vec<Offer>>;

    async fn create(&self, offer: NewOffer) -> AppResult<Offer>;
}

pub struct OfferManager<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> OfferManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> OfferService for OfferManager<S> {
    async fn list_active(&self) -> AppResult<Vec<Offer>> {
        self.storage.offers().find_by_active(true).await
    }

    async fn create(&self, offer: NewOffer) -> AppResult<Offer> {
        let created = self.storage.offers().create(offer).await?;
        tracing::info!(offer_id = created.id, "Offer created");
        Ok(created)
    }
}
