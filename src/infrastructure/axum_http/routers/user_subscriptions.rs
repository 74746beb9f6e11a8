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
    application::usecases::user_subscriptions::UserSubscriptionUseCase,
    domain::{
        repositories::{
            discounts::DiscountRepository, plans::PlanRepository,
            user_subscriptions::UserSubscriptionRepository, users::UserRepository,
        },
        value_objects::user_subscriptions::{AssignSubscriptionModel, QuoteRequestModel},
    },
    infrastructure::{
        axum_http::{auth::AdminUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                discounts::DiscountPostgres, plans::PlanPostgres,
                user_subscriptions::UserSubscriptionPostgres, users::UserPostgres,
            },
        },
    },
};

type AssignmentState<U, P, D, S> = State<Arc<UserSubscriptionUseCase<U, P, D, S>>>;

/// Mounted at the API root: quotes hang off plans, assignments off users.
pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_subscription_usecase = UserSubscriptionUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
        Arc::new(DiscountPostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserSubscriptionPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/plans/:plan_id/quote", post(quote))
        .route(
            "/users/:user_id/subscriptions",
            get(list_for_user).post(assign).delete(remove),
        )
        .with_state(Arc::new(user_subscription_usecase))
}

pub async fn quote<U, P, D, S>(
    State(user_subscription_usecase): AssignmentState<U, P, D, S>,
    _admin: AdminUser,
    Path(plan_id): Path<Uuid>,
    Json(quote_request_model): Json<QuoteRequestModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_subscription_usecase
        .quote(plan_id, quote_request_model)
        .await
    {
        Ok(quote) => (StatusCode::OK, Json(quote)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn list_for_user<U, P, D, S>(
    State(user_subscription_usecase): AssignmentState<U, P, D, S>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_subscription_usecase.list_for_user(user_id).await {
        Ok(assignments) => (StatusCode::OK, Json(assignments)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn assign<U, P, D, S>(
    State(user_subscription_usecase): AssignmentState<U, P, D, S>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
    Json(assign_subscription_model): Json<AssignSubscriptionModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_subscription_usecase
        .assign(user_id, assign_subscription_model)
        .await
    {
        Ok(assignments) => (StatusCode::CREATED, Json(assignments)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn remove<U, P, D, S>(
    State(user_subscription_usecase): AssignmentState<U, P, D, S>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match user_subscription_usecase.remove(user_id).await {
        Ok(assignments) => (StatusCode::OK, Json(assignments)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
