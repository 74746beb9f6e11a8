use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::{enums::user_statuses::UserStatus, validation::ValidationError},
    infrastructure::postgres::schema::users,
};

#[derive(Debug, Clone, PartialEq)]
pub struct UserEntity {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub mobile_number: String,
    pub device_id: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = users)]
pub struct UserRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub mobile_number: String,
    pub device_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct InsertUserEntity {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub mobile_number: String,
    pub device_id: Option<String>,
    pub status: String,
}

impl TryFrom<UserRow> for UserEntity {
    type Error = ValidationError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let status = UserStatus::from_str(&value.status).ok_or_else(|| {
            ValidationError::malformed("user", value.id, format!("status {}", value.status))
        })?;

        Ok(Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
            username: value.username,
            mobile_number: value.mobile_number,
            device_id: value.device_id.filter(|device_id| !device_id.is_empty()),
            status,
            created_at: value.created_at,
        })
    }
}
