use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    application::usecases::users::UserUseCase,
    domain::{
        repositories::{
            plans::PlanRepository, user_subscriptions::UserSubscriptionRepository,
            users::UserRepository,
        },
        value_objects::users::RegisterUserModel,
    },
    infrastructure::{
        axum_http::{auth::AdminUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                plans::PlanPostgres, user_subscriptions::UserSubscriptionPostgres,
                users::UserPostgres,
            },
        },
    },
};

type UserState<U, P, S> = State<Arc<UserUseCase<U, P, S>>>;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let user_subscription_repository = UserSubscriptionPostgres::new(Arc::clone(&db_pool));
    let user_usecase = UserUseCase::new(
        Arc::new(user_repository),
        Arc::new(plan_repository),
        Arc::new(user_subscription_repository),
    );

    Router::new()
        .route("/", get(list_users).post(register_user))
        .route("/:user_id/activate", post(activate_user))
        .route("/:user_id/deactivate", post(deactivate_user))
        .route("/:user_id/unlink-device", post(unlink_device))
        .with_state(Arc::new(user_usecase))
}

pub async fn list_users<U, P, S>(
    State(user_usecase): UserState<U, P, S>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_usecase.list_users().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn register_user<U, P, S>(
    State(user_usecase): UserState<U, P, S>,
    _admin: AdminUser,
    Json(register_user_model): Json<RegisterUserModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_usecase.register_user(register_user_model).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn activate_user<U, P, S>(
    State(user_usecase): UserState<U, P, S>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_usecase.activate_user(user_id).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn deactivate_user<U, P, S>(
    State(user_usecase): UserState<U, P, S>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_usecase.deactivate_user(user_id).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn unlink_device<U, P, S>(
    State(user_usecase): UserState<U, P, S>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_usecase.unlink_device(user_id).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
