use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, dsl::exists, insert_into, prelude::*, select, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::users::{InsertUserEntity, UserEntity, UserRow},
        repositories::users::UserRepository,
        value_objects::enums::user_statuses::UserStatus,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::users},
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn create(&self, insert_user_entity: InsertUserEntity) -> Result<UserEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = insert_into(users::table)
            .values(&insert_user_entity)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)?;

        Ok(UserEntity::try_from(row)?)
    }

    async fn exists_by_email(&self, email: String) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let taken = select(exists(users::table.filter(users::email.eq(email))))
            .get_result::<bool>(&mut conn)?;

        Ok(taken)
    }

    async fn list_users(&self) -> Result<Vec<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = users::table
            .order(users::full_name.asc())
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)?;

        let users = rows
            .into_iter()
            .map(UserEntity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let row = users::table
            .filter(users::id.eq(user_id))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .optional()?;

        Ok(row.map(UserEntity::try_from).transpose()?)
    }

    async fn update_status(&self, user_id: Uuid, status: UserStatus) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(users::table)
            .filter(users::id.eq(user_id))
            .set((
                users::status.eq(status.to_string()),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    async fn clear_device(&self, user_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let updated = update(users::table)
            .filter(users::id.eq(user_id))
            .set((
                users::device_id.eq(None::<String>),
                users::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }
}
