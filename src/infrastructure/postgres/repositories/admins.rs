use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::admins::{AdminEntity, InsertAdminEntity},
        repositories::admins::AdminRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::admins},
};

pub struct AdminPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AdminPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AdminRepository for AdminPostgres {
    async fn create(&self, insert_admin_entity: InsertAdminEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let admin_id = insert_into(admins::table)
            .values(&insert_admin_entity)
            .returning(admins::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(admin_id)
    }

    async fn find_by_email(&self, email: String) -> Result<Option<AdminEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let admin = admins::table
            .filter(admins::email.eq(email))
            .select(AdminEntity::as_select())
            .first::<AdminEntity>(&mut conn)
            .optional()?;

        Ok(admin)
    }
}
