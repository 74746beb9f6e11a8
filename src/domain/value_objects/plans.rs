use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::plans::{InsertPlanEntity, PlanEntity},
    value_objects::{
        enums::{billing_durations::BillingDuration, plan_statuses::PlanStatus},
        money,
        validation::ValidationError,
    },
};

/// Features arrive either as a list or as the comma separated text the admin
/// typed into the form.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FeaturesInput {
    List(Vec<String>),
    Text(String),
}

impl Default for FeaturesInput {
    fn default() -> Self {
        FeaturesInput::List(Vec::new())
    }
}

impl FeaturesInput {
    pub fn into_features(self) -> Vec<String> {
        match self {
            FeaturesInput::List(items) => clean_features(items.iter().map(String::as_str)),
            FeaturesInput::Text(text) => parse_features(&text),
        }
    }
}

/// Splits on commas, trims, and drops empty entries.
pub fn parse_features(text: &str) -> Vec<String> {
    clean_features(text.split(','))
}

fn clean_features<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertPlanModel {
    #[serde(default)]
    pub plan_name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub features: FeaturesInput,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub status: PlanStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub default_discount_id: Option<Uuid>,
}

impl InsertPlanModel {
    /// Checks every field and reports all problems at once.
    pub fn validate(self, today: NaiveDate) -> Result<InsertPlanEntity, ValidationError> {
        let mut errors = Vec::new();

        let plan_name = self.plan_name.trim().to_string();
        if plan_name.is_empty() {
            errors.push("Plan name is required".to_string());
        }

        let price_minor = match self.price.map(money::round_to_scale) {
            Some(price) if price > Decimal::ZERO => {
                let minor = money::to_minor_units(price);
                if minor.is_none() {
                    errors.push("Price is too large".to_string());
                }
                minor
            }
            _ => {
                errors.push("Price must be greater than 0".to_string());
                None
            }
        };

        let features = self.features.into_features();
        if features.is_empty() {
            errors.push("At least one feature is required".to_string());
        }

        let duration = match self.duration {
            None => {
                errors.push("Duration is required".to_string());
                None
            }
            Some(months) => match BillingDuration::try_from(months) {
                Ok(duration) => Some(duration),
                Err(err) => {
                    errors.push(err.to_string());
                    None
                }
            },
        };

        match (price_minor, duration) {
            (Some(price_minor), Some(duration)) if errors.is_empty() => Ok(InsertPlanEntity {
                plan_name,
                price_minor,
                features: serde_json::Value::from(features),
                duration_months: duration.into(),
                status: self.status.to_string(),
                default_discount_id: self.default_discount_id,
                start_date: self.start_date.unwrap_or(today),
            }),
            _ => Err(ValidationError::InvalidFields(errors)),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanDto {
    pub id: Uuid,
    pub plan_name: String,
    pub price: Decimal,
    pub formatted_price: String,
    pub features: Vec<String>,
    pub duration: BillingDuration,
    pub status: PlanStatus,
    pub default_discount_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<PlanEntity> for PlanDto {
    fn from(value: PlanEntity) -> Self {
        Self {
            id: value.id,
            plan_name: value.plan_name,
            price: value.price,
            formatted_price: money::format_price(value.price),
            features: value.features,
            duration: value.duration,
            status: value.status,
            default_discount_id: value.default_discount_id,
            start_date: value.start_date,
            created_at: value.created_at,
        }
    }
}
