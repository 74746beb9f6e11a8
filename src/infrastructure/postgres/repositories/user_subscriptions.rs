use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::user_subscriptions::{
            InsertUserSubscriptionEntity, UserSubscriptionEntity, UserSubscriptionRow,
        },
        repositories::user_subscriptions::UserSubscriptionRepository,
        value_objects::enums::assignment_statuses::AssignmentStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::user_subscriptions},
};

pub struct UserSubscriptionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserSubscriptionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

fn into_entities(rows: Vec<UserSubscriptionRow>) -> Result<Vec<UserSubscriptionEntity>> {
    let entities = rows
        .into_iter()
        .map(UserSubscriptionEntity::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(entities)
}

#[async_trait]
impl UserSubscriptionRepository for UserSubscriptionPostgres {
    async fn list_all(&self) -> Result<Vec<UserSubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = user_subscriptions::table
            .order(user_subscriptions::created_at.desc())
            .select(UserSubscriptionRow::as_select())
            .load::<UserSubscriptionRow>(&mut conn)?;

        into_entities(rows)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserSubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = user_subscriptions::table
            .filter(user_subscriptions::user_id.eq(user_id))
            .order(user_subscriptions::created_at.desc())
            .select(UserSubscriptionRow::as_select())
            .load::<UserSubscriptionRow>(&mut conn)?;

        into_entities(rows)
    }

    async fn find_active_for_user(&self, user_id: Uuid) -> Result<Option<UserSubscriptionEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = user_subscriptions::table
            .filter(user_subscriptions::user_id.eq(user_id))
            .filter(user_subscriptions::status.eq(AssignmentStatus::Active.to_string()))
            .order(user_subscriptions::created_at.desc())
            .select(UserSubscriptionRow::as_select())
            .first::<UserSubscriptionRow>(&mut conn)
            .optional()?;

        Ok(row.map(UserSubscriptionEntity::try_from).transpose()?)
    }

    async fn replace_active(
        &self,
        insert_user_subscription_entity: InsertUserSubscriptionEntity,
    ) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;
        let now = Utc::now();

        let assignment_id = conn.transaction::<Uuid, diesel::result::Error, _>(|tx| {
            update(user_subscriptions::table)
                .filter(user_subscriptions::user_id.eq(insert_user_subscription_entity.user_id))
                .filter(user_subscriptions::status.eq(AssignmentStatus::Active.to_string()))
                .set((
                    user_subscriptions::status.eq(AssignmentStatus::Inactive.to_string()),
                    user_subscriptions::updated_at.eq(now),
                ))
                .execute(tx)?;

            insert_into(user_subscriptions::table)
                .values(&insert_user_subscription_entity)
                .returning(user_subscriptions::id)
                .get_result::<Uuid>(tx)
        })?;

        Ok(assignment_id)
    }

    async fn deactivate_active_for_user(&self, user_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(user_subscriptions::table)
            .filter(user_subscriptions::user_id.eq(user_id))
            .filter(user_subscriptions::status.eq(AssignmentStatus::Active.to_string()))
            .set((
                user_subscriptions::status.eq(AssignmentStatus::Inactive.to_string()),
                user_subscriptions::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }
}
