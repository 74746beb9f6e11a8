use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::users::{InsertUserEntity, UserEntity},
    value_objects::enums::user_statuses::UserStatus,
};

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn create(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity>;
    async fn exists_by_email(&self, email: String) -> Result<bool>;
    /// Ordered by full name.
    async fn list_users(&self) -> Result<Vec<UserEntity>>;
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>>;
    async fn update_status(&self, user_id: Uuid, status: UserStatus) -> Result<bool>;
    async fn clear_device(&self, user_id: Uuid) -> Result<bool>;
}
