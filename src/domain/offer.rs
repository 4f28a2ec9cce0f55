//! Promotional offers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: i64,
    #[schema(example = "Weekend Special")]
    pub title: String,
    /// Free-form discount label, e.g. "20%"
    #[schema(example = "20%")]
    pub discount: String,
    #[schema(value_type = Option<String>, example = "2025-12-31")]
    pub valid_till: Option<NaiveDate>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NewOffer {
    pub title: String,
    pub discount: String,
    pub valid_till: Option<NaiveDate>,
    pub active: bool,
}
