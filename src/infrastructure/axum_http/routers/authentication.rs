use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::{
    application::usecases::authentication::AuthenticationUseCase,
    config::config_model::AdminAuth,
    domain::{repositories::admins::AdminRepository, value_objects::iam::AdminCredentialsModel},
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{postgres_connection::PgPoolSquad, repositories::admins::AdminPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>, admin_auth: Arc<AdminAuth>) -> Router {
    let admin_repository = AdminPostgres::new(Arc::clone(&db_pool));
    let authentication_usecase =
        AuthenticationUseCase::new(Arc::new(admin_repository), admin_auth);

    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .with_state(Arc::new(authentication_usecase))
}

pub async fn sign_up<T>(
    State(authentication_usecase): State<Arc<AuthenticationUseCase<T>>>,
    Json(credentials): Json<AdminCredentialsModel>,
) -> impl IntoResponse
where
    T: AdminRepository + Send + Sync + 'static,
{
    match authentication_usecase.sign_up(credentials).await {
        Ok(token) => (StatusCode::CREATED, Json(token)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn sign_in<T>(
    State(authentication_usecase): State<Arc<AuthenticationUseCase<T>>>,
    Json(credentials): Json<AdminCredentialsModel>,
) -> impl IntoResponse
where
    T: AdminRepository + Send + Sync + 'static,
{
    match authentication_usecase.sign_in(credentials).await {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
