//! Price quotes for a plan over a commitment period.
//!
//! A quote stacks two discounts. The duration tier discount is applied to the
//! full `price x months` amount first; an optional additional percentage
//! (taken from a saved discount or entered manually, never both) is then
//! applied to what is left after the tier discount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    entities::discounts::DiscountEntity, value_objects::enums::billing_durations::BillingDuration,
};

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("Price must be greater than 0")]
    InvalidBasePrice,
    #[error("Please enter a valid discount percentage between 0 and 100 (got {0})")]
    InvalidDiscountPercentage(Decimal),
    #[error("Unsupported duration: {0} months")]
    UnknownDuration(i32),
}

/// A discount percentage in `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercentage(Decimal);

impl DiscountPercentage {
    pub fn new(value: Decimal) -> Result<Self, PricingError> {
        if value <= Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(PricingError::InvalidDiscountPercentage(value));
        }
        Ok(Self(value.normalize()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for DiscountPercentage {
    type Error = PricingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercentage> for Decimal {
    fn from(value: DiscountPercentage) -> Self {
        value.0
    }
}

/// Where the additional discount of a quote comes from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DiscountSource {
    #[default]
    None,
    Saved(DiscountEntity),
    Manual(DiscountPercentage),
}

impl DiscountSource {
    /// A manual entry of exactly 0 means no additional discount.
    pub fn manual(percentage: Decimal) -> Result<Self, PricingError> {
        if percentage.is_zero() {
            return Ok(DiscountSource::None);
        }
        DiscountPercentage::new(percentage).map(DiscountSource::Manual)
    }

    pub fn percentage(&self) -> Option<Decimal> {
        match self {
            DiscountSource::None => None,
            DiscountSource::Saved(discount) => Some(discount.percentage.value()),
            DiscountSource::Manual(percentage) => Some(percentage.value()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceQuote {
    pub original_price: Decimal,
    pub duration_discount: Decimal,
    pub additional_discount: Decimal,
    pub total_discount: Decimal,
    pub final_price: Decimal,
    pub discount_percentage: Decimal,
}

impl PriceQuote {
    /// Validated entry point used by the assignment flow.
    pub fn compute(
        base_price: Decimal,
        duration: BillingDuration,
        source: &DiscountSource,
    ) -> Result<Self, PricingError> {
        if base_price <= Decimal::ZERO {
            return Err(PricingError::InvalidBasePrice);
        }
        Ok(compute_quote(
            base_price,
            duration.months(),
            source.percentage(),
        ))
    }
}

/// Duration tier rate as a fraction. Durations outside the table get no
/// tier discount.
pub fn tier_rate(duration_months: u32) -> Decimal {
    match duration_months {
        3 => Decimal::new(5, 2),
        6 => Decimal::new(10, 2),
        12 => Decimal::new(15, 2),
        _ => Decimal::ZERO,
    }
}

/// Total over its input domain: never fails and never divides by zero.
/// A percentage of `Some(0)` is the same as `None`.
pub fn compute_quote(
    base_price: Decimal,
    duration_months: u32,
    applied_discount_percentage: Option<Decimal>,
) -> PriceQuote {
    let original_price = base_price * Decimal::from(duration_months);
    let duration_discount = original_price * tier_rate(duration_months);
    let price_after_tier = original_price - duration_discount;

    let additional_discount = match applied_discount_percentage {
        Some(percentage) if !percentage.is_zero() => {
            price_after_tier * percentage / Decimal::ONE_HUNDRED
        }
        _ => Decimal::ZERO,
    };

    let final_price = price_after_tier - additional_discount;
    let total_discount = duration_discount + additional_discount;
    let discount_percentage = if original_price.is_zero() {
        Decimal::ZERO
    } else {
        total_discount / original_price * Decimal::ONE_HUNDRED
    };

    PriceQuote {
        original_price: original_price.normalize(),
        duration_discount: duration_discount.normalize(),
        additional_discount: additional_discount.normalize(),
        total_discount: total_discount.normalize(),
        final_price: final_price.normalize(),
        discount_percentage: discount_percentage.normalize(),
    }
}
