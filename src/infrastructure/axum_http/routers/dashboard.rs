use std::sync::Arc;

use axum::{
    Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use chrono::Utc;

use crate::{
    application::usecases::dashboard::DashboardUseCase,
    domain::repositories::{
        plans::PlanRepository, user_subscriptions::UserSubscriptionRepository,
        users::UserRepository,
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

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let dashboard_usecase = DashboardUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
        Arc::new(UserSubscriptionPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/stats", get(stats))
        .route("/subscription-chart", get(subscription_chart))
        .with_state(Arc::new(dashboard_usecase))
}

pub async fn stats<U, P, S>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<U, P, S>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match dashboard_usecase.stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn subscription_chart<U, P, S>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<U, P, S>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    match dashboard_usecase
        .subscription_chart(Utc::now().date_naive())
        .await
    {
        Ok(chart) => (StatusCode::OK, Json(chart)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
