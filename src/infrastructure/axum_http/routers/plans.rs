use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use uuid::Uuid;

use crate::{
    application::usecases::plans::PlanUseCase,
    domain::{
        repositories::{discounts::DiscountRepository, plans::PlanRepository},
        value_objects::plans::InsertPlanModel,
    },
    infrastructure::{
        axum_http::{auth::AdminUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{discounts::DiscountPostgres, plans::PlanPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_repository = PlanPostgres::new(Arc::clone(&db_pool));
    let discount_repository = DiscountPostgres::new(Arc::clone(&db_pool));
    let plan_usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));

    Router::new()
        .route("/", get(list_plans).post(create_plan))
        .route("/:plan_id", delete(delete_plan))
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<P, D>(
    State(plan_usecase): State<Arc<PlanUseCase<P, D>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
{
    match plan_usecase.list_plans().await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn create_plan<P, D>(
    State(plan_usecase): State<Arc<PlanUseCase<P, D>>>,
    _admin: AdminUser,
    Json(insert_plan_model): Json<InsertPlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
{
    match plan_usecase.create_plan(insert_plan_model).await {
        Ok(plan) => (StatusCode::CREATED, Json(plan)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn delete_plan<P, D>(
    State(plan_usecase): State<Arc<PlanUseCase<P, D>>>,
    _admin: AdminUser,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
{
    match plan_usecase.delete_plan(plan_id).await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
