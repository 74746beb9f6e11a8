use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::discounts::DiscountRepository,
        value_objects::discounts::{DiscountDto, InsertDiscountModel},
    },
};

pub struct DiscountUseCase<T>
where
    T: DiscountRepository + Send + Sync + 'static,
{
    discount_repository: Arc<T>,
}

impl<T> DiscountUseCase<T>
where
    T: DiscountRepository + Send + Sync + 'static,
{
    pub fn new(discount_repository: Arc<T>) -> Self {
        Self {
            discount_repository,
        }
    }

    pub async fn create_discount(
        &self,
        insert_discount_model: InsertDiscountModel,
    ) -> UseCaseResult<DiscountDto> {
        let insert_discount_entity = insert_discount_model.validate().map_err(|err| {
            warn!(error = %err, "discounts: invalid discount form");
            UseCaseError::from(err)
        })?;

        let discount = self
            .discount_repository
            .create(insert_discount_entity)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "discounts: failed to insert discount");
                UseCaseError::Internal(err)
            })?;

        info!(
            discount_id = %discount.id,
            percentage = %discount.percentage.value(),
            "discounts: discount created"
        );
        Ok(DiscountDto::from(discount))
    }

    pub async fn list_active_discounts(&self) -> UseCaseResult<Vec<DiscountDto>> {
        let discounts = self.discount_repository.list_active().await.map_err(|err| {
            error!(db_error = ?err, "discounts: failed to list discounts");
            UseCaseError::Internal(err)
        })?;

        Ok(discounts.into_iter().map(DiscountDto::from).collect())
    }

    /// Soft delete; assignments that already carry this discount keep their stamp.
    pub async fn deactivate_discount(&self, discount_id: Uuid) -> UseCaseResult<Vec<DiscountDto>> {
        let deactivated = self
            .discount_repository
            .deactivate(discount_id)
            .await
            .map_err(|err| {
                error!(%discount_id, db_error = ?err, "discounts: failed to deactivate discount");
                UseCaseError::Internal(err)
            })?;
        if !deactivated {
            warn!(%discount_id, "discounts: no active discount to deactivate");
            return Err(UseCaseError::NotFound("discount"));
        }

        info!(%discount_id, "discounts: discount deactivated");
        self.list_active_discounts().await
    }
}
