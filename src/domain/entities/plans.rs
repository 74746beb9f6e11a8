use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    domain::value_objects::{
        enums::{billing_durations::BillingDuration, plan_statuses::PlanStatus},
        money,
        validation::ValidationError,
    },
    infrastructure::postgres::schema::plans,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub plan_name: String,
    /// Monthly price.
    pub price: Decimal,
    pub features: Vec<String>,
    pub duration: BillingDuration,
    pub status: PlanStatus,
    pub default_discount_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Raw row used for Diesel queries. Features stay as JSON and are checked when
/// converted into a PlanEntity.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanRow {
    pub id: Uuid,
    pub plan_name: String,
    pub price_minor: i64,
    pub features: serde_json::Value,
    pub duration_months: i32,
    pub status: String,
    pub default_discount_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = plans)]
pub struct InsertPlanEntity {
    pub plan_name: String,
    pub price_minor: i64,
    pub features: serde_json::Value,
    pub duration_months: i32,
    pub status: String,
    pub default_discount_id: Option<Uuid>,
    pub start_date: NaiveDate,
}

impl TryFrom<PlanRow> for PlanEntity {
    type Error = ValidationError;

    fn try_from(value: PlanRow) -> Result<Self, Self::Error> {
        let id = value.id;

        if value.plan_name.trim().is_empty() {
            return Err(ValidationError::malformed("plan", id, "empty plan name"));
        }
        if value.price_minor <= 0 {
            return Err(ValidationError::malformed(
                "plan",
                id,
                format!("price_minor {}", value.price_minor),
            ));
        }

        let features: Vec<String> = serde_json::from_value(value.features)
            .map_err(|err| ValidationError::malformed("plan", id, format!("features: {err}")))?;
        if features.is_empty() || features.iter().any(|feature| feature.trim().is_empty()) {
            return Err(ValidationError::malformed("plan", id, "empty feature"));
        }

        let duration = BillingDuration::try_from(value.duration_months)
            .map_err(|err| ValidationError::malformed("plan", id, err.to_string()))?;
        let status = PlanStatus::from_str(&value.status).ok_or_else(|| {
            ValidationError::malformed("plan", id, format!("status {}", value.status))
        })?;

        Ok(Self {
            id,
            plan_name: value.plan_name,
            price: money::from_minor_units(value.price_minor),
            features,
            duration,
            status,
            default_discount_id: value.default_discount_id,
            start_date: value.start_date,
            created_at: value.created_at,
        })
    }
}
