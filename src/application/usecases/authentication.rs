use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{error, info, warn};

use crate::{
    application::errors::{UseCaseError, UseCaseResult, is_unique_violation},
    config::config_model::AdminAuth,
    domain::{
        entities::admins::{AdminEntity, InsertAdminEntity},
        repositories::admins::AdminRepository,
        value_objects::{
            iam::{AdminClaims, AdminCredentialsModel, AuthTokenDto},
            users::MIN_PASSWORD_LENGTH,
            validation::ValidationError,
        },
    },
};

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {err}"))?;

    Ok(password_hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

pub fn issue_admin_token(
    admin_id: &str,
    email: &str,
    admin_auth: &AdminAuth,
    now: DateTime<Utc>,
) -> Result<AuthTokenDto> {
    let expires_at = now + Duration::seconds(admin_auth.token_ttl_seconds);
    let claims = AdminClaims {
        sub: admin_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    let access_token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(admin_auth.jwt_secret.as_bytes()),
    )
    .context("failed to sign admin token")?;

    Ok(AuthTokenDto {
        access_token,
        token_type: "Bearer",
        expires_at,
    })
}

pub fn validate_admin_token(token: &str, jwt_secret: &str) -> Result<AdminClaims> {
    let token_data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .context("admin token validation failed")?;

    Ok(token_data.claims)
}

pub struct AuthenticationUseCase<T>
where
    T: AdminRepository + Send + Sync + 'static,
{
    admin_repository: Arc<T>,
    admin_auth: Arc<AdminAuth>,
}

impl<T> AuthenticationUseCase<T>
where
    T: AdminRepository + Send + Sync + 'static,
{
    pub fn new(admin_repository: Arc<T>, admin_auth: Arc<AdminAuth>) -> Self {
        Self {
            admin_repository,
            admin_auth,
        }
    }

    pub async fn sign_up(&self, credentials: AdminCredentialsModel) -> UseCaseResult<AuthTokenDto> {
        let email = credentials.normalized_email();

        let mut errors = Vec::new();
        if email.is_empty() || !email.contains('@') {
            errors.push("A valid email is required".to_string());
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.push(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ));
        }
        if !errors.is_empty() {
            warn!("auth: invalid sign-up form");
            return Err(ValidationError::InvalidFields(errors).into());
        }

        let existing = self
            .admin_repository
            .find_by_email(email.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up admin");
                UseCaseError::Internal(err)
            })?;
        if existing.is_some() {
            warn!(%email, "auth: admin already registered");
            return Err(UseCaseError::Conflict(
                "An admin with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&credentials.password).map_err(|err| {
            error!(error = ?err, "auth: failed to hash admin password");
            UseCaseError::Internal(err)
        })?;

        let admin_id = self
            .admin_repository
            .create(InsertAdminEntity {
                email: email.clone(),
                password_hash,
            })
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(db_error = ?err, "auth: admin email taken concurrently");
                    return UseCaseError::Conflict(
                        "An admin with this email already exists".to_string(),
                    );
                }
                error!(db_error = ?err, "auth: failed to insert admin");
                UseCaseError::Internal(err)
            })?;

        info!(%admin_id, "auth: admin registered");
        issue_admin_token(&admin_id.to_string(), &email, &self.admin_auth, Utc::now())
            .map_err(UseCaseError::Internal)
    }

    pub async fn sign_in(&self, credentials: AdminCredentialsModel) -> UseCaseResult<AuthTokenDto> {
        let email = credentials.normalized_email();

        let admin: Option<AdminEntity> = self
            .admin_repository
            .find_by_email(email.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "auth: failed to look up admin");
                UseCaseError::Internal(err)
            })?;

        let Some(admin) = admin else {
            warn!(%email, "auth: sign-in for unknown admin");
            return Err(UseCaseError::Unauthorized);
        };
        if !verify_password(&credentials.password, &admin.password_hash) {
            warn!(admin_id = %admin.id, "auth: wrong password");
            return Err(UseCaseError::Unauthorized);
        }

        info!(admin_id = %admin.id, "auth: admin signed in");
        issue_admin_token(&admin.id.to_string(), &admin.email, &self.admin_auth, Utc::now())
            .map_err(UseCaseError::Internal)
    }
}
