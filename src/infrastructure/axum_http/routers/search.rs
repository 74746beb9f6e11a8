use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::usecases::search::SearchUseCase,
    domain::repositories::{plans::PlanRepository, users::UserRepository},
    infrastructure::{
        axum_http::{auth::AdminUser, error_responses::AppError},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{plans::PlanPostgres, users::UserPostgres},
        },
    },
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let search_usecase = SearchUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&db_pool))),
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/", get(search))
        .with_state(Arc::new(search_usecase))
}

pub async fn search<U, P>(
    State(search_usecase): State<Arc<SearchUseCase<U, P>>>,
    _admin: AdminUser,
    Query(search_query): Query<SearchQuery>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    match search_usecase.search(&search_query.q).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
