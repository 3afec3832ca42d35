use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::SessionService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{NotificationService, RateLimiter};

/// Server state - shared references to every service
///
/// Cloned into each request handler; `Arc` fields make the clone cheap.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Configuration (immutable) |
/// | pool | SQLite connection pool |
/// | session_service | Admin session tokens |
/// | rate_limiter | Order-endpoint throttle (process-local) |
/// | notifier | Order notification dispatch |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub session_service: Arc<SessionService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub notifier: Arc<NotificationService>,
}

impl ServerState {
    /// Manual construction (tests use this with an in-memory pool)
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let session_service = Arc::new(SessionService::with_config(config.session.clone()));
        let notifier = Arc::new(NotificationService::new(config.notify.clone()));
        Self {
            config,
            pool,
            session_service,
            rate_limiter: Arc::new(RateLimiter::new()),
            notifier,
        }
    }

    /// Initialize server state: work directory, database, services.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized -
    /// there is nothing to serve without them.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.pool)
    }
}
