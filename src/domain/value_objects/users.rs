use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::users::{InsertUserEntity, UserEntity},
    value_objects::{
        enums::{assignment_statuses::AssignmentStatus, user_statuses::UserStatus},
        validation::ValidationError,
    },
};

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserModel {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub device_id: Option<String>,
}

impl RegisterUserModel {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push("Full name is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            errors.push("A valid email is required".to_string());
        }
        if self.username.trim().is_empty() {
            errors.push("Username is required".to_string());
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidFields(errors))
        }
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn to_entity(&self, password_hash: String) -> InsertUserEntity {
        InsertUserEntity {
            full_name: self.full_name.trim().to_string(),
            email: self.normalized_email(),
            username: self.username.trim().to_string(),
            password_hash,
            mobile_number: self.mobile_number.trim().to_string(),
            device_id: self
                .device_id
                .as_ref()
                .map(|device_id| device_id.trim().to_string())
                .filter(|device_id| !device_id.is_empty()),
            status: UserStatus::Active.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub mobile_number: String,
    pub device_id: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for UserDto {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            email: value.email,
            username: value.username,
            mobile_number: value.mobile_number,
            device_id: value.device_id,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

/// The plan a user is currently on, as shown in the user list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentSubscriptionInfo {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    pub price: Decimal,
    pub formatted_price: String,
    pub status: AssignmentStatus,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserWithSubscriptionDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub subscription: Option<CurrentSubscriptionInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> RegisterUserModel {
        RegisterUserModel {
            full_name: " Asha Rao ".to_string(),
            email: " Asha@Example.com ".to_string(),
            username: "asha".to_string(),
            password: "s3cret!".to_string(),
            mobile_number: "9876543210".to_string(),
            device_id: Some("  ".to_string()),
        }
    }

    #[test]
    fn accepts_complete_registration() {
        let model = model();
        assert!(model.validate().is_ok());

        let entity = model.to_entity("hash".to_string());
        assert_eq!(entity.full_name, "Asha Rao");
        assert_eq!(entity.email, "asha@example.com");
        assert_eq!(entity.device_id, None);
        assert_eq!(entity.status, "active");
    }

    #[test]
    fn rejects_short_password_and_bad_email() {
        let mut model = model();
        model.email = "not-an-email".to_string();
        model.password = "12345".to_string();

        assert_eq!(
            model.validate(),
            Err(ValidationError::InvalidFields(vec![
                "A valid email is required".to_string(),
                "Password must be at least 6 characters".to_string(),
            ]))
        );
    }
}
