//! Payment entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::lifecycle::{transition, PaymentStatus, TransitionPolicy};
use crate::errors::AppResult;

/// Payment domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub booking_id: i64,
    #[schema(value_type = f64, example = 150)]
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
    #[schema(example = "CARD")]
    pub payment_method: Option<String>,
}

impl Payment {
    /// Mark the payment as settled.
    pub fn approve(&mut self, policy: TransitionPolicy) -> AppResult<()> {
        self.status = transition(self.status, PaymentStatus::Completed, policy)?;
        Ok(())
    }

    pub fn reject(&mut self, policy: TransitionPolicy) -> AppResult<()> {
        self.status = transition(self.status, PaymentStatus::Rejected, policy)?;
        Ok(())
    }

    pub fn apply(&mut self, changes: PaymentChanges, policy: TransitionPolicy) -> AppResult<()> {
        let status = match changes.status {
            Some(target) if target != self.status => {
                transition(self.status, target, policy)?
            }
            _ => self.status,
        };

        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
        if let Some(method) = changes.payment_method {
            self.payment_method = Some(method);
        }
        self.status = status;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: i64,
    pub booking_id: i64,
    pub amount: Decimal,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
}

/// Field-level payment update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct PaymentChanges {
    pub amount: Option<Decimal>,
    pub status: Option<PaymentStatus>,
    pub payment_method: Option<String>,
}
