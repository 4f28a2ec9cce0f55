//! User repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use super::into_domain;
use crate::domain::{NewUser, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Accounts are never deleted, so there is no delete operation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; `join_date` is stamped here
    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Exact match on the stored (already normalised) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn list(&self) -> AppResult<Vec<User>>;
}

/// SeaORM-backed implementation of `UserRepository`
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            name: Set(user.name),
            phone: Set(user.phone),
            address: Set(user.address),
            role: Set(user.role.as_str().to_string()),
            join_date: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        User::try_from(model)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;
        into_domain(models)
    }
}
