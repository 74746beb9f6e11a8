use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::user_subscriptions::{
    InsertUserSubscriptionEntity, UserSubscriptionEntity,
};

#[async_trait]
#[automock]
pub trait UserSubscriptionRepository {
    /// Newest first.
    async fn list_all(&self) -> Result<Vec<UserSubscriptionEntity>>;
    /// Newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserSubscriptionEntity>>;
    async fn find_active_for_user(&self, user_id: Uuid) -> Result<Option<UserSubscriptionEntity>>;
    /// Deactivates the user's current assignment and inserts the new one in a
    /// single transaction.
    async fn replace_active(
        &self,
        insert_user_subscription_entity: InsertUserSubscriptionEntity,
    ) -> Result<Uuid>;
    async fn deactivate_active_for_user(&self, user_id: Uuid) -> Result<bool>;
}
