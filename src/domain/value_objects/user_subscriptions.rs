use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::user_subscriptions::{AppliedDiscount, QuoteStamp, UserSubscriptionEntity},
    value_objects::enums::{
        assignment_statuses::AssignmentStatus, billing_durations::BillingDuration,
    },
};

/// Which additional discount the admin picked. Selecting a saved discount and
/// typing a manual percentage are mutually exclusive.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DiscountSelection {
    #[default]
    None,
    Saved {
        discount_id: Uuid,
    },
    Manual {
        percentage: Decimal,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequestModel {
    pub duration: i32,
    #[serde(default)]
    pub discount: DiscountSelection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignSubscriptionModel {
    pub plan_id: Uuid,
    pub duration: i32,
    #[serde(default)]
    pub discount: DiscountSelection,
}

impl AssignSubscriptionModel {
    pub fn quote_request(&self) -> QuoteRequestModel {
        QuoteRequestModel {
            duration: self.duration,
            discount: self.discount.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSubscriptionDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub duration: BillingDuration,
    pub status: AssignmentStatus,
    pub discount: AppliedDiscount,
    pub quote: QuoteStamp,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<UserSubscriptionEntity> for UserSubscriptionDto {
    fn from(value: UserSubscriptionEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            plan_id: value.plan_id,
            duration: value.duration,
            status: value.status,
            discount: value.applied_discount,
            quote: value.quote,
            starts_at: value.starts_at,
            created_at: value.created_at,
        }
    }
}
