use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::plans::{InsertPlanEntity, PlanEntity};

#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn create(&self, insert_plan_entity: InsertPlanEntity) -> Result<PlanEntity>;
    /// Newest first.
    async fn list_plans(&self) -> Result<Vec<PlanEntity>>;
    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>>;
    async fn exists_by_name(&self, plan_name: String) -> Result<bool>;
    /// Returns false when no plan had this id.
    async fn delete(&self, plan_id: Uuid) -> Result<bool>;
}
