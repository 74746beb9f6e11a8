use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, dsl::exists, insert_into, prelude::*, select};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::plans::{InsertPlanEntity, PlanEntity, PlanRow},
        repositories::plans::PlanRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::plans},
};

pub struct PlanPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PlanPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PlanRepository for PlanPostgres {
    async fn create(&self, insert_plan_entity: InsertPlanEntity) -> Result<PlanEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(plans::table)
            .values(&insert_plan_entity)
            .returning(PlanRow::as_returning())
            .get_result::<PlanRow>(&mut conn)?;

        Ok(PlanEntity::try_from(row)?)
    }

    async fn list_plans(&self) -> Result<Vec<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = plans::table
            .order(plans::created_at.desc())
            .select(PlanRow::as_select())
            .load::<PlanRow>(&mut conn)?;

        let plans = rows
            .into_iter()
            .map(PlanEntity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(plans)
    }

    async fn find_by_id(&self, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = plans::table
            .filter(plans::id.eq(plan_id))
            .select(PlanRow::as_select())
            .first::<PlanRow>(&mut conn)
            .optional()?;

        Ok(row.map(PlanEntity::try_from).transpose()?)
    }

    async fn exists_by_name(&self, plan_name: String) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let taken = select(exists(plans::table.filter(plans::plan_name.eq(plan_name))))
            .get_result::<bool>(&mut conn)?;

        Ok(taken)
    }

    async fn delete(&self, plan_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = diesel::delete(plans::table.filter(plans::id.eq(plan_id))).execute(&mut conn)?;

        Ok(deleted > 0)
    }
}
