use std::sync::Arc;

use anyhow::anyhow;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::warn;
use uuid::Uuid;

use crate::{
    application::usecases::authentication::validate_admin_token,
    config::config_model::AdminAuth, infrastructure::axum_http::error_responses::AppError,
};

/// A request carrying a valid admin bearer token.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub admin_id: Uuid,
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let admin_auth = parts
            .extensions
            .get::<Arc<AdminAuth>>()
            .cloned()
            .ok_or_else(|| AppError::Internal(anyhow!("admin auth settings are not installed")))?;

        let claims = validate_admin_token(bearer.token(), &admin_auth.jwt_secret).map_err(|err| {
            warn!(error = %err, "auth: rejected bearer token");
            AppError::Unauthorized
        })?;

        let admin_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

        Ok(AdminUser {
            admin_id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::usecases::authentication::issue_admin_token;
    use axum::http::{Request, header::AUTHORIZATION};
    use chrono::Utc;

    fn admin_auth() -> Arc<AdminAuth> {
        Arc::new(AdminAuth {
            jwt_secret: "supersecretjwtsecretforunittesting123".to_string(),
            token_ttl_seconds: 600,
        })
    }

    async fn extract(authorization: Option<String>) -> Result<AdminUser, AppError> {
        let mut builder = Request::builder().uri("/api/v1/plans");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        parts.extensions.insert(admin_auth());

        AdminUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn accepts_valid_admin_token() {
        let admin_id = Uuid::new_v4();
        let token =
            issue_admin_token(&admin_id.to_string(), "ops@example.com", &admin_auth(), Utc::now())
                .unwrap();

        let admin = extract(Some(format!("Bearer {}", token.access_token)))
            .await
            .unwrap();

        assert_eq!(admin.admin_id, admin_id);
        assert_eq!(admin.email, "ops@example.com");
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        assert!(matches!(extract(None).await, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn rejects_token_signed_with_another_secret() {
        let other = AdminAuth {
            jwt_secret: "wrongsecret".to_string(),
            token_ttl_seconds: 600,
        };
        let token =
            issue_admin_token(&Uuid::new_v4().to_string(), "ops@example.com", &other, Utc::now())
                .unwrap();

        let result = extract(Some(format!("Bearer {}", token.access_token))).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn rejects_non_bearer_scheme() {
        let result = extract(Some("Basic b3BzOnNlY3JldA==".to_string())).await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
