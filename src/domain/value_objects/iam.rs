use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentialsModel {
    pub email: String,
    pub password: String,
}

impl AdminCredentialsModel {
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminClaims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthTokenDto {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}
