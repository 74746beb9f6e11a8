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
    application::usecases::discounts::DiscountUseCase,
    domain::{
        repositories::discounts::DiscountRepository,
        value_objects::discounts::InsertDiscountModel,
    },
    infrastructure::{
        axum_http::{auth::AdminUser, error_responses::AppError},
        postgres::{postgres_connection::PgPoolSquad, repositories::discounts::DiscountPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let discount_repository = DiscountPostgres::new(Arc::clone(&db_pool));
    let discount_usecase = DiscountUseCase::new(Arc::new(discount_repository));

    Router::new()
        .route("/", get(list_discounts).post(create_discount))
        .route("/:discount_id", delete(deactivate_discount))
        .with_state(Arc::new(discount_usecase))
}

pub async fn list_discounts<T>(
    State(discount_usecase): State<Arc<DiscountUseCase<T>>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    T: DiscountRepository + Send + Sync + 'static,
{
    match discount_usecase.list_active_discounts().await {
        Ok(discounts) => (StatusCode::OK, Json(discounts)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn create_discount<T>(
    State(discount_usecase): State<Arc<DiscountUseCase<T>>>,
    _admin: AdminUser,
    Json(insert_discount_model): Json<InsertDiscountModel>,
) -> impl IntoResponse
where
    T: DiscountRepository + Send + Sync + 'static,
{
    match discount_usecase.create_discount(insert_discount_model).await {
        Ok(discount) => (StatusCode::CREATED, Json(discount)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

pub async fn deactivate_discount<T>(
    State(discount_usecase): State<Arc<DiscountUseCase<T>>>,
    _admin: AdminUser,
    Path(discount_id): Path<Uuid>,
) -> impl IntoResponse
where
    T: DiscountRepository + Send + Sync + 'static,
{
    match discount_usecase.deactivate_discount(discount_id).await {
        Ok(discounts) => (StatusCode::OK, Json(discounts)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
