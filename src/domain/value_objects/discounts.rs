use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::discounts::{DiscountEntity, InsertDiscountEntity},
    value_objects::{
        enums::discount_statuses::DiscountStatus, money, pricing::DiscountPercentage,
        validation::ValidationError,
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct InsertDiscountModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub percentage: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
}

impl InsertDiscountModel {
    pub fn validate(self) -> Result<InsertDiscountEntity, ValidationError> {
        let name = self.name.trim().to_string();
        let Some(percentage) = self.percentage else {
            return Err(ValidationError::field("Please fill in all required fields"));
        };
        if name.is_empty() {
            return Err(ValidationError::field("Please fill in all required fields"));
        }

        let percentage = DiscountPercentage::new(money::round_to_scale(percentage))?;
        let percentage_bp = money::to_basis_points(percentage.value())
            .ok_or_else(|| ValidationError::field("Discount percentage is out of range"))?;

        Ok(InsertDiscountEntity {
            name,
            percentage_bp,
            description: self
                .description
                .map(|description| description.trim().to_string())
                .filter(|description| !description.is_empty()),
            status: DiscountStatus::Active.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiscountDto {
    pub id: Uuid,
    pub name: String,
    pub percentage: Decimal,
    pub description: Option<String>,
    pub status: DiscountStatus,
    pub created_at: DateTime<Utc>,
}

impl From<DiscountEntity> for DiscountDto {
    fn from(value: DiscountEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            percentage: value.percentage.value(),
            description: value.description,
            status: value.status,
            created_at: value.created_at,
        }
    }
}
