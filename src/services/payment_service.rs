//! Payment service.
//!
//! No gateway is involved: approve and reject only record an outcome.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::{
    LifecycleStatus, NewPayment, Payment, PaymentChanges, PaymentStatus, TransitionPolicy,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::Storage;

/// Payment request after validation
#[derive(Debug, Clone)]
pub struct PaymentDraft {
    pub user_id: i64,
    pub booking_id: i64,
    pub amount: Decimal,
    pub payment_method: Option<String>,
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn list_all(&self) -> AppResult<Vec<Payment>>;

    /// Record a PENDING payment. The user and booking must exist.
    async fn create(&self, draft: PaymentDraft) -> AppResult<Payment>;

    async fn get(&self, id: i64) -> AppResult<Payment>;

    async fn update(&self, id: i64, changes: PaymentChanges) -> AppResult<Payment>;

    async fn delete(&self, id: i64) -> AppResult<()>;

    async fn approve(&self, id: i64) -> AppResult<Payment>;

    async fn reject(&self, id: i64) -> AppResult<Payment>;

    async fn list_by_status(&self, status: PaymentStatus) -> AppResult<Vec<Payment>>;

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Payment>>;
}

pub struct PaymentManager<S: Storage> {
    storage: Arc<S>,
    policy: TransitionPolicy,
}

impl<S: Storage> PaymentManager<S> {
    pub fn new(storage: Arc<S>, policy: TransitionPolicy) -> Self {
        Self { storage, policy }
    }
}

#[async_trait]
impl<S: Storage> PaymentService for PaymentManager<S> {
    async fn list_all(&self) -> AppResult<Vec<Payment>> {
        self.storage.payments().find_all().await
    }

    async fn create(&self, draft: PaymentDraft) -> AppResult<Payment> {
        if draft.amount.is_sign_negative() {
            return Err(AppError::validation("Amount must not be negative"));
        }
        if self.storage.users().find_by_id(draft.user_id).await?.is_none() {
            return Err(AppError::validation("Referenced user does not exist"));
        }
        let booking = self
            .storage
            .bookings()
            .find_by_id(draft.booking_id)
            .await?
            .ok_or_else(|| AppError::validation("Referenced booking does not exist"))?;
        if booking.user_id != draft.user_id {
            tracing::debug!(
                booking_id = booking.id,
                user_id = draft.user_id,
                "Payment refused, booking belongs to another user"
            );
            return Err(AppError::Forbidden);
        }

        let payment = self
            .storage
            .payments()
            .create(NewPayment {
                user_id: draft.user_id,
                booking_id: draft.booking_id,
                amount: draft.amount,
                payment_date: Utc::now(),
                status: PaymentStatus::INITIAL,
                payment_method: draft.payment_method,
            })
            .await?;

        tracing::info!(payment_id = payment.id, booking_id = payment.booking_id, "Payment recorded");
        Ok(payment)
    }

    async fn get(&self, id: i64) -> AppResult<Payment> {
        self.storage.payments().find_by_id(id).await?.ok_or_not_found()
    }

    async fn update(&self, id: i64, changes: PaymentChanges) -> AppResult<Payment> {
        let mut payment = self.get(id).await?;
        payment.apply(changes, self.policy)?;
        self.storage.payments().save(payment).await
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        self.storage.payments().delete(id).await
    }

    async fn approve(&self, id: i64) -> AppResult<Payment> {
        let mut payment = self.get(id).await?;
        payment.approve(self.policy)?;
        tracing::info!(payment_id = id, "Payment approved");
        self.storage.payments().save(payment).await
    }

    async fn reject(&self, id: i64) -> AppResult<Payment> {
        let mut payment = self.get(id).await?;
        payment.reject(self.policy)?;
        tracing::info!(payment_id = id, "Payment rejected");
        self.storage.payments().save(payment).await
    }

    async fn list_by_status(&self, status: PaymentStatus) -> AppResult<Vec<Payment>> {
        self.storage.payments().find_by_status(status).await
    }

    async fn list_by_user(&self, user_id: i64) -> AppResult<Vec<Payment>> {
        self.storage.payments().find_by_user_id(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingStatus, UserRole};
    use crate::infra::repositories::{MockBookingRepository, MockPaymentRepository, MockUserRepository};
    use crate::services::test_support::{booking_fixture, user_fixture, TestStorage};

    fn payment(status: PaymentStatus) -> Payment {
        Payment {
            id: 8,
            user_id: 2,
            booking_id: 3,
            amount: Decimal::from(150),
            payment_date: Utc::now(),
            status,
            payment_method: Some("CARD".to_string()),
        }
    }

    fn draft() -> PaymentDraft {
        PaymentDraft {
            user_id: 2,
            booking_id: 3,
            amount: Decimal::from(150),
            payment_method: Some("CARD".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_records_pending_payment() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_fixture(id, UserRole::User, "h"))));
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|id| Ok(Some(booking_fixture(id, 2, BookingStatus::Confirmed))));
        let mut payments = MockPaymentRepository::new();
        payments.expect_create().returning(|new| {
            Ok(Payment {
                id: 1,
                user_id: new.user_id,
                booking_id: new.booking_id,
                amount: new.amount,
                payment_date: new.payment_date,
                status: new.status,
                payment_method: new.payment_method,
            })
        });

        let storage = TestStorage::new()
            .with_users(users)
            .with_bookings(bookings)
            .with_payments(payments)
            .shared();
        let created = PaymentManager::new(storage, TransitionPolicy::Permissive)
            .create(draft())
            .await
            .unwrap();
        assert_eq!(created.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_requires_existing_booking() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_fixture(id, UserRole::User, "h"))));
        let mut bookings = MockBookingRepository::new();
        bookings.expect_find_by_id().returning(|_| Ok(None));

        let storage = TestStorage::new()
            .with_users(users)
            .with_bookings(bookings)
            .shared();
        let result = PaymentManager::new(storage, TransitionPolicy::Permissive)
            .create(draft())
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_refuses_booking_of_another_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_fixture(id, UserRole::User, "h"))));
        let mut bookings = MockBookingRepository::new();
        bookings
            .expect_find_by_id()
            .returning(|id| Ok(Some(booking_fixture(id, 9, BookingStatus::Confirmed))));
        let mut payments = MockPaymentRepository::new();
        payments.expect_create().never();

        let storage = TestStorage::new()
            .with_users(users)
            .with_bookings(bookings)
            .with_payments(payments)
            .shared();
        let result = PaymentManager::new(storage, TransitionPolicy::Permissive)
            .create(draft())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_approve_twice_is_allowed_when_permissive() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_find_by_id()
            .returning(|_| Ok(Some(payment(PaymentStatus::Completed))));
        payments.expect_save().times(1).returning(Ok);

        let manager = PaymentManager::new(
            TestStorage::new().with_payments(payments).shared(),
            TransitionPolicy::Permissive,
        );
        let approved = manager.approve(8).await.unwrap();
        assert_eq!(approved.status, PaymentStatus::Completed);
    }

    #[tokio::test]
    async fn test_reject_completed_refused_when_strict() {
        let mut payments = MockPaymentRepository::new();
        payments
            .expect_find_by_id()
            .returning(|_| Ok(Some(payment(PaymentStatus::Completed))));
        payments.expect_save().never();

        let manager = PaymentManager::new(
            TestStorage::new().with_payments(payments).shared(),
            TransitionPolicy::Strict,
        );
        let result = manager.reject(8).await;
        assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_approve_missing_payment() {
        let mut payments = MockPaymentRepository::new();
        payments.expect_find_by_id().returning(|_| Ok(None));

        let manager = PaymentManager::new(
            TestStorage::new().with_payments(payments).shared(),
            TransitionPolicy::Permissive,
        );
        assert!(matches!(manager.approve(1).await, Err(AppError::NotFound)));
    }
}
