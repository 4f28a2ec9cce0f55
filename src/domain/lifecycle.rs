//! Status lifecycles shared by bookings, rentals and payments.
//!
//! Under `TransitionPolicy::Permissive` every transition is an overwrite,
//! including re-entering the current state or leaving a terminal one.
//! `TransitionPolicy::Strict` only accepts the legal predecessors listed in
//! each status type's `legal_predecessors`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

/// How status transitions are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn is_strict(&self) -> bool {
        matches!(self, TransitionPolicy::Strict)
    }
}

/// A status field driven by named transitions
pub trait LifecycleStatus: Copy + Eq + fmt::Display + 'static {
    /// Status every new record starts in
    const INITIAL: Self;

    /// States from which `self` may be entered under the strict policy
    fn legal_predecessors(&self) -> &'static [Self];

    /// Whether no modelled transition leads anywhere from here
    fn is_terminal(&self) -> bool;
}

/// Move `current` to `target` according to `policy`.
pub fn transition<S: LifecycleStatus>(current: S, target: S, policy: TransitionPolicy) -> AppResult<S> {
    if policy.is_strict() && !target.legal_predecessors().contains(&current) {
        return Err(AppError::invalid_transition(current, target));
    }
    Ok(target)
}

/// Status shared by bookings and rentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl LifecycleStatus for BookingStatus {
    const INITIAL: Self = BookingStatus::Pending;

    fn legal_predecessors(&self) -> &'static [Self] {
        match self {
            BookingStatus::Pending => &[],
            BookingStatus::Confirmed | BookingStatus::Rejected => &[BookingStatus::Pending],
            BookingStatus::Completed => &[BookingStatus::Confirmed],
        }
    }

    fn is_terminal(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "COMPLETED" => Ok(BookingStatus::Completed),
            other => Err(AppError::validation(format!("Unknown booking status: {}", other))),
        }
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Rejected => "REJECTED",
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl LifecycleStatus for PaymentStatus {
    const INITIAL: Self = PaymentStatus::Pending;

    fn legal_predecessors(&self) -> &'static [Self] {
        match self {
            PaymentStatus::Pending => &[],
            PaymentStatus::Completed | PaymentStatus::Rejected => &[PaymentStatus::Pending],
        }
    }

    fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "COMPLETED" => Ok(PaymentStatus::Completed),
            "REJECTED" => Ok(PaymentStatus::Rejected),
            other => Err(AppError::validation(format!("Unknown payment status: {}", other))),
        }
    }
}
