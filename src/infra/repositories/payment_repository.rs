//! Payment repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
    Unchanged,
};

use super::entities::payment::{self, ActiveModel, Entity as PaymentEntity};
use super::{into_domain, not_found_on_missing_row};
use crate::domain::{NewPayment, Payment, PaymentStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;

    async fn save(&self, payment: Payment) -> AppResult<Payment>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>>;

    async fn find_all(&self) -> AppResult<Vec<Payment>>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn find_by_status(&self, status: PaymentStatus) -> AppResult<Vec<Payment>>;

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Payment>>;
}

pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        let active_model = ActiveModel {
            id: NotSet,
            user_id: Set(payment.user_id),
            booking_id: Set(payment.booking_id),
            amount: Set(payment.amount),
            payment_date: Set(payment.payment_date),
            status: Set(payment.status.as_str().to_string()),
            payment_method: Set(payment.payment_method),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Payment::try_from(model)
    }

    async fn save(&self, payment: Payment) -> AppResult<Payment> {
        let active_model = ActiveModel {
            id: Unchanged(payment.id),
            user_id: Set(payment.user_id),
            booking_id: Set(payment.booking_id),
            amount: Set(payment.amount),
            payment_date: Set(payment.payment_date),
            status: Set(payment.status.as_str().to_string()),
            payment_method: Set(payment.payment_method),
        };

        let model = active_model
            .update(&self.db)
            .await
            .map_err(not_found_on_missing_row)?;
        Payment::try_from(model)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>> {
        PaymentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Payment::try_from)
            .transpose()
    }

    async fn find_all(&self) -> AppResult<Vec<Payment>> {
        into_domain(PaymentEntity::find().all(&self.db).await?)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = PaymentEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn find_by_status(&self, status: PaymentStatus) -> AppResult<Vec<Payment>> {
        let models = PaymentEntity::find()
            .filter(payment::Column::Status.eq(status.as_str()))
            .all(&self.db)
            .await?;
        into_domain(models)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Payment>> {
        let models = PaymentEntity::find()
            .filter(payment::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        into_domain(models)
    }
}
