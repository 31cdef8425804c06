use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;

/// Shared server state
///
/// Cloned into every handler; all fields are cheap `Arc`/pool handles and
/// never mutated after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the database (running migrations) and build the token service
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::from_parts(config.clone(), db.pool))
    }

    pub fn from_parts(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            pool,
            jwt_service,
            config: Arc::new(config),
        }
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
