#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub admin_auth: AdminAuth,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    /// MiB.
    pub body_limit: u64,
    /// Seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
}
