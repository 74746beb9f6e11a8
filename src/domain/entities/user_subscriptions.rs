use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    domain::value_objects::{
        enums::{assignment_statuses::AssignmentStatus, billing_durations::BillingDuration},
        money,
        pricing::{DiscountSource, PriceQuote},
        validation::ValidationError,
    },
    infrastructure::postgres::schema::user_subscriptions,
};

/// Discount recorded on an assignment at the time it was made.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AppliedDiscount {
    None,
    Saved {
        discount_id: Uuid,
        name: String,
        percentage: Decimal,
    },
    Manual {
        percentage: Decimal,
    },
}

/// Quote amounts stamped on an assignment. Always satisfies
/// `original_price = final_price + total_discount`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteStamp {
    pub original_price: Decimal,
    pub total_discount: Decimal,
    pub final_price: Decimal,
    pub discount_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSubscriptionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub duration: BillingDuration,
    pub status: AssignmentStatus,
    pub applied_discount: AppliedDiscount,
    pub quote: QuoteStamp,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = user_subscriptions)]
pub struct UserSubscriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub duration_months: i32,
    pub status: String,
    pub applied_discount_id: Option<Uuid>,
    pub applied_discount_name: Option<String>,
    pub applied_discount_bp: Option<i32>,
    pub applied_discount_manual: bool,
    pub original_price_minor: i64,
    pub total_discount_minor: i64,
    pub final_price_minor: i64,
    pub effective_discount_bp: i32,
    pub starts_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = user_subscriptions)]
pub struct InsertUserSubscriptionEntity {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub duration_months: i32,
    pub status: String,
    pub applied_discount_id: Option<Uuid>,
    pub applied_discount_name: Option<String>,
    pub applied_discount_bp: Option<i32>,
    pub applied_discount_manual: bool,
    pub original_price_minor: i64,
    pub total_discount_minor: i64,
    pub final_price_minor: i64,
    pub effective_discount_bp: i32,
    pub starts_at: DateTime<Utc>,
}

impl InsertUserSubscriptionEntity {
    /// Builds an active assignment stamped with `quote`. The total discount is
    /// derived from the rounded original and final amounts so the stamp keeps
    /// `original = final + total` in minor units.
    pub fn stamped(
        user_id: Uuid,
        plan_id: Uuid,
        duration: BillingDuration,
        source: &DiscountSource,
        quote: &PriceQuote,
        starts_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let out_of_range = || ValidationError::field("Quote amount is out of range");

        let original_price_minor =
            money::to_minor_units(quote.original_price).ok_or_else(out_of_range)?;
        let final_price_minor = money::to_minor_units(quote.final_price).ok_or_else(out_of_range)?;
        let effective_discount_bp =
            money::to_basis_points(quote.discount_percentage).ok_or_else(out_of_range)?;

        let (applied_discount_id, applied_discount_name, applied_discount_bp, manual) =
            match source {
                DiscountSource::None => (None, None, None, false),
                DiscountSource::Saved(discount) => (
                    Some(discount.id),
                    Some(discount.name.clone()),
                    Some(
                        money::to_basis_points(discount.percentage.value())
                            .ok_or_else(out_of_range)?,
                    ),
                    false,
                ),
                DiscountSource::Manual(percentage) => (
                    None,
                    None,
                    Some(money::to_basis_points(percentage.value()).ok_or_else(out_of_range)?),
                    true,
                ),
            };

        Ok(Self {
            user_id,
            plan_id,
            duration_months: duration.into(),
            status: AssignmentStatus::Active.to_string(),
            applied_discount_id,
            applied_discount_name,
            applied_discount_bp,
            applied_discount_manual: manual,
            original_price_minor,
            total_discount_minor: original_price_minor - final_price_minor,
            final_price_minor,
            effective_discount_bp,
            starts_at,
        })
    }
}

impl TryFrom<UserSubscriptionRow> for UserSubscriptionEntity {
    type Error = ValidationError;

    fn try_from(value: UserSubscriptionRow) -> Result<Self, Self::Error> {
        let id = value.id;
        let malformed = |reason: String| ValidationError::malformed("user subscription", id, reason);

        let duration =
            BillingDuration::try_from(value.duration_months).map_err(|err| malformed(err.to_string()))?;
        let status = AssignmentStatus::from_str(&value.status)
            .ok_or_else(|| malformed(format!("status {}", value.status)))?;

        let applied_discount = match (
            value.applied_discount_bp,
            value.applied_discount_manual,
            value.applied_discount_id,
        ) {
            (None, _, _) => AppliedDiscount::None,
            (Some(bp), true, _) => AppliedDiscount::Manual {
                percentage: money::from_basis_points(bp),
            },
            (Some(bp), false, Some(discount_id)) => AppliedDiscount::Saved {
                discount_id,
                name: value.applied_discount_name.unwrap_or_default(),
                percentage: money::from_basis_points(bp),
            },
            (Some(_), false, None) => {
                return Err(malformed("saved discount without id".to_string()));
            }
        };

        if value.original_price_minor != value.final_price_minor + value.total_discount_minor {
            return Err(malformed("quote amounts do not add up".to_string()));
        }

        Ok(Self {
            id,
            user_id: value.user_id,
            plan_id: value.plan_id,
            duration,
            status,
            applied_discount,
            quote: QuoteStamp {
                original_price: money::from_minor_units(value.original_price_minor),
                total_discount: money::from_minor_units(value.total_discount_minor),
                final_price: money::from_minor_units(value.final_price_minor),
                discount_percentage: money::from_basis_points(value.effective_discount_bp),
            },
            starts_at: value.starts_at,
            created_at: value.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::pricing::compute_quote;
    use rust_decimal_macros::dec;

    #[test]
    fn stamps_manual_discount_and_quote() {
        let quote = compute_quote(dec!(1000), 12, Some(dec!(10)));
        let source = DiscountSource::manual(dec!(10)).unwrap();

        let insert = InsertUserSubscriptionEntity::stamped(
            Uuid::new_v4(),
            Uuid::new_v4(),
            BillingDuration::TwelveMonths,
            &source,
            &quote,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(insert.duration_months, 12);
        assert_eq!(insert.status, "active");
        assert_eq!(insert.original_price_minor, 1_200_000);
        assert_eq!(insert.final_price_minor, 918_000);
        assert_eq!(insert.total_discount_minor, 282_000);
        assert_eq!(insert.effective_discount_bp, 2350);
        assert_eq!(insert.applied_discount_bp, Some(1000));
        assert!(insert.applied_discount_manual);
        assert_eq!(insert.applied_discount_id, None);
    }

    #[test]
    fn stamp_keeps_amounts_consistent_after_rounding() {
        let quote = compute_quote(dec!(333.33), 3, Some(dec!(7.77)));

        let insert = InsertUserSubscriptionEntity::stamped(
            Uuid::new_v4(),
            Uuid::new_v4(),
            BillingDuration::ThreeMonths,
            &DiscountSource::manual(dec!(7.77)).unwrap(),
            &quote,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(
            insert.original_price_minor,
            insert.final_price_minor + insert.total_discount_minor
        );
    }

    #[test]
    fn reads_back_a_stamped_row() {
        let now = Utc::now();
        let discount_id = Uuid::new_v4();
        let row = UserSubscriptionRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            duration_months: 3,
            status: "inactive".to_string(),
            applied_discount_id: Some(discount_id),
            applied_discount_name: Some("Diwali".to_string()),
            applied_discount_bp: Some(500),
            applied_discount_manual: false,
            original_price_minor: 300_000,
            total_discount_minor: 29_250,
            final_price_minor: 270_750,
            effective_discount_bp: 975,
            starts_at: now,
            created_at: now,
            updated_at: now,
        };

        let entity = UserSubscriptionEntity::try_from(row).unwrap();

        assert_eq!(entity.status, AssignmentStatus::Inactive);
        assert_eq!(entity.quote.final_price, dec!(2707.5));
        assert_eq!(entity.quote.discount_percentage, dec!(9.75));
        assert_eq!(
            entity.applied_discount,
            AppliedDiscount::Saved {
                discount_id,
                name: "Diwali".to_string(),
                percentage: dec!(5),
            }
        );
    }
}
