use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::pricing::PricingError;

/// Commitment lengths offered for a plan. Serialized as the number of months.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub enum BillingDuration {
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl BillingDuration {
    pub const ALL: [BillingDuration; 4] = [
        BillingDuration::OneMonth,
        BillingDuration::ThreeMonths,
        BillingDuration::SixMonths,
        BillingDuration::TwelveMonths,
    ];

    pub fn months(&self) -> u32 {
        match self {
            BillingDuration::OneMonth => 1,
            BillingDuration::ThreeMonths => 3,
            BillingDuration::SixMonths => 6,
            BillingDuration::TwelveMonths => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillingDuration::OneMonth => "1 Month",
            BillingDuration::ThreeMonths => "3 Months",
            BillingDuration::SixMonths => "6 Months",
            BillingDuration::TwelveMonths => "12 Months",
        }
    }
}

impl TryFrom<i32> for BillingDuration {
    type Error = PricingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BillingDuration::OneMonth),
            3 => Ok(BillingDuration::ThreeMonths),
            6 => Ok(BillingDuration::SixMonths),
            12 => Ok(BillingDuration::TwelveMonths),
            other => Err(PricingError::UnknownDuration(other)),
        }
    }
}

impl From<BillingDuration> for i32 {
    fn from(value: BillingDuration) -> Self {
        value.months() as i32
    }
}

impl Display for BillingDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
