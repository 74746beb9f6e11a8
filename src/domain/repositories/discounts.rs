use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::discounts::{DiscountEntity, InsertDiscountEntity};

#[async_trait]
#[automock]
pub trait DiscountRepository {
    async fn create(&self, insert_discount_entity: InsertDiscountEntity) -> Result<DiscountEntity>;
    async fn list_active(&self) -> Result<Vec<DiscountEntity>>;
    async fn find_active_by_id(&self, discount_id: Uuid) -> Result<Option<DiscountEntity>>;
    /// Soft delete. Returns false when no active discount had this id.
    async fn deactivate(&self, discount_id: Uuid) -> Result<bool>;
}
