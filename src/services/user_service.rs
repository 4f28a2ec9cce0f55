//! User service - account listing with derived booking counts.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

use crate::domain::{User, UserResponse};
use crate::errors::{AppResult, OptionExt};
use crate::infra::Storage;

#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: i64) -> AppResult<UserResponse>;

    async fn list_users(&self) -> AppResult<Vec<UserResponse>>;
}

pub struct UserManager<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> UserManager<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    async fn with_booking_count(&self, user: User) -> AppResult<UserResponse> {
        let total = self.storage.bookings().count_by_user_id(user.id).await?;
        Ok(UserResponse::new(user, total))
    }
}

#[async_trait]
impl<S: Storage> UserService for UserManager<S> {
    async fn get_user(&self, id: i64) -> AppResult<UserResponse> {
        let user = self.storage.users().find_by_id(id).await?.ok_or_not_found()?;
        self.with_booking_count(user).await
    }

    async fn list_users(&self) -> AppResult<Vec<UserResponse>> {
        let users = self.storage.users().list().await?;
        try_join_all(users.into_iter().map(|user| self.with_booking_count(user))).await
    }
}
