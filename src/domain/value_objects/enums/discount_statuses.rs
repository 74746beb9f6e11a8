use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Discounts are never deleted; `Inactive` is the soft-deleted state.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountStatus {
    #[default]
    Active,
    Inactive,
}

impl DiscountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountStatus::Active => "active",
            DiscountStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "active" => Some(DiscountStatus::Active),
            "inactive" => Some(DiscountStatus::Inactive),
            _ => None,
        }
    }
}

impl Display for DiscountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
