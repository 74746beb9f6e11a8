use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::{
        enums::discount_statuses::DiscountStatus, money, pricing::DiscountPercentage,
        validation::ValidationError,
    },
    infrastructure::postgres::schema::discounts,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DiscountEntity {
    pub id: Uuid,
    pub name: String,
    pub percentage: DiscountPercentage,
    pub description: Option<String>,
    pub status: DiscountStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = discounts)]
pub struct DiscountRow {
    pub id: Uuid,
    pub name: String,
    pub percentage_bp: i32,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = discounts)]
pub struct InsertDiscountEntity {
    pub name: String,
    pub percentage_bp: i32,
    pub description: Option<String>,
    pub status: String,
}

impl TryFrom<DiscountRow> for DiscountEntity {
    type Error = ValidationError;

    fn try_from(value: DiscountRow) -> Result<Self, Self::Error> {
        let percentage = DiscountPercentage::new(money::from_basis_points(value.percentage_bp))
            .map_err(|err| ValidationError::malformed("discount", value.id, err.to_string()))?;
        let status = DiscountStatus::from_str(&value.status).ok_or_else(|| {
            ValidationError::malformed("discount", value.id, format!("status {}", value.status))
        })?;

        Ok(Self {
            id: value.id,
            name: value.name,
            percentage,
            description: value.description,
            status,
            created_at: value.created_at,
        })
    }
}
