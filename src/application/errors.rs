use axum::http::StatusCode;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::value_objects::{pricing::PricingError, validation::ValidationError};

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UseCaseError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Conflict(_) => StatusCode::CONFLICT,
            UseCaseError::Unauthorized => StatusCode::UNAUTHORIZED,
            UseCaseError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for UseCaseError {
    fn from(value: ValidationError) -> Self {
        match value {
            ValidationError::InvalidFields(_) => UseCaseError::InvalidArgument(value.to_string()),
            ValidationError::MalformedRecord { .. } => UseCaseError::Internal(value.into()),
        }
    }
}

impl From<PricingError> for UseCaseError {
    fn from(value: PricingError) -> Self {
        UseCaseError::InvalidArgument(value.to_string())
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;

/// A write lost a race against a unique index.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _))
    )
}
