use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::discounts::{DiscountEntity, DiscountRow, InsertDiscountEntity},
        repositories::discounts::DiscountRepository,
        value_objects::enums::discount_statuses::DiscountStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::discounts},
};

pub struct DiscountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DiscountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl DiscountRepository for DiscountPostgres {
    async fn create(&self, insert_discount_entity: InsertDiscountEntity) -> Result<DiscountEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(discounts::table)
            .values(&insert_discount_entity)
            .returning(DiscountRow::as_returning())
            .get_result::<DiscountRow>(&mut conn)?;

        Ok(DiscountEntity::try_from(row)?)
    }

    async fn list_active(&self) -> Result<Vec<DiscountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = discounts::table
            .filter(discounts::status.eq(DiscountStatus::Active.to_string()))
            .order(discounts::created_at.desc())
            .select(DiscountRow::as_select())
            .load::<DiscountRow>(&mut conn)?;

        let discounts = rows
            .into_iter()
            .map(DiscountEntity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(discounts)
    }

    async fn find_active_by_id(&self, discount_id: Uuid) -> Result<Option<DiscountEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = discounts::table
            .filter(discounts::id.eq(discount_id))
            .filter(discounts::status.eq(DiscountStatus::Active.to_string()))
            .select(DiscountRow::as_select())
            .first::<DiscountRow>(&mut conn)
            .optional()?;

        Ok(row.map(DiscountEntity::try_from).transpose()?)
    }

    async fn deactivate(&self, discount_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(discounts::table)
            .filter(discounts::id.eq(discount_id))
            .filter(discounts::status.eq(DiscountStatus::Active.to_string()))
            .set((
                discounts::status.eq(DiscountStatus::Inactive.to_string()),
                discounts::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }
}
