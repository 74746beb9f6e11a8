pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::{config::config_loader, infrastructure::postgres::postgres_connection};

pub async fn run() -> Result<()> {
    let stage = observability::init_observability("plan-desk")?;

    let dotenvy_env = config_loader::load()?;
    info!(%stage, "ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    infrastructure::axum_http::http_serve::start(Arc::new(dotenvy_env), Arc::new(postgres_pool))
        .await?;

    Ok(())
}
