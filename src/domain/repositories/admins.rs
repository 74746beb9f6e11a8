use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::admins::{AdminEntity, InsertAdminEntity};

#[async_trait]
#[automock]
pub trait AdminRepository {
    async fn create(&self, insert_admin_entity: InsertAdminEntity) -> Result<Uuid>;
    async fn find_by_email(&self, email: String) -> Result<Option<AdminEntity>>;
}
