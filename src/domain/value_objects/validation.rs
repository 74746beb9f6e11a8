use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::pricing::PricingError;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Every problem found in a submitted form, joined for display.
    #[error("{}", .0.join(", "))]
    InvalidFields(Vec<String>),

    #[error("malformed {record} record {id}: {reason}")]
    MalformedRecord {
        record: &'static str,
        id: Uuid,
        reason: String,
    },
}

impl ValidationError {
    pub fn field(message: impl Into<String>) -> Self {
        ValidationError::InvalidFields(vec![message.into()])
    }

    pub fn malformed(record: &'static str, id: Uuid, reason: impl Into<String>) -> Self {
        ValidationError::MalformedRecord {
            record,
            id,
            reason: reason.into(),
        }
    }
}

impl From<PricingError> for ValidationError {
    fn from(value: PricingError) -> Self {
        ValidationError::field(value.to_string())
    }
}
