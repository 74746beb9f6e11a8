use anyhow::{Context, Result};

use super::{
    config_model::{AdminAuth, Database, DotEnvyConfig, Server},
    stage::Stage,
};

const DEFAULT_ADMIN_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .context("SERVER_PORT is invalid")?
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .context("SERVER_BODY_LIMIT is invalid")?
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .context("SERVER_TIMEOUT is invalid")?
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").context("DATABASE_URL is invalid")?,
    };

    let admin_auth = AdminAuth {
        jwt_secret: std::env::var("JWT_ADMIN_SECRET").context("JWT_ADMIN_SECRET is invalid")?,
        token_ttl_seconds: match std::env::var("JWT_ADMIN_TTL_SECONDS") {
            Ok(ttl) => ttl.parse().context("JWT_ADMIN_TTL_SECONDS is invalid")?,
            Err(_) => DEFAULT_ADMIN_TOKEN_TTL_SECONDS,
        },
    };

    Ok(DotEnvyConfig {
        server,
        database,
        admin_auth,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or_default();
    Stage::try_from(stage_str.as_str()).unwrap_or_default()
}
