use std::path::PathBuf;

use crate::auth::SessionConfig;
use crate::services::{NotifyConfig, RateLimitConfig};

/// Server configuration
///
/// Every field can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/storefront | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | ADMIN_PASSWORD | (unset) | Admin login password (plain) |
/// | ADMIN_PASSWORD_HASH | (unset) | Admin login password (argon2 PHC) |
/// | JWT_SECRET | (generated in dev) | Session token signing secret |
/// | ORDER_RATE_LIMIT | 5 | Order submissions per window per client |
/// | ORDER_RATE_WINDOW_MS | 60000 | Rate-limit window in milliseconds |
/// | RESEND_API_KEY | (unset) | Primary email provider |
/// | ORDER_WEBHOOK_URL | (unset) | Secondary notification gateway |
/// | ORDER_TO_EMAIL | orders@... | Owner notification address |
/// | SITE_URL | https://... | Public site URL used in notifications |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Session token configuration
    pub session: SessionConfig,
    /// Notification provider configuration
    pub notify: NotifyConfig,
    /// Rate limit applied to the public order endpoint
    pub order_rate_limit: RateLimitConfig,
    /// Admin password (plain comparison; prefer the hash)
    pub admin_password: Option<String>,
    /// Admin password as an argon2 PHC string
    pub admin_password_hash: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults where unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            session: SessionConfig::default(),
            notify: NotifyConfig::from_env(),
            order_rate_limit: RateLimitConfig {
                max_requests: std::env::var("ORDER_RATE_LIMIT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
                window_ms: std::env::var("ORDER_RATE_WINDOW_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60_000),
            },
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            admin_password_hash: std::env::var("ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }

    /// Override the work dir and port (test scenarios)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory holding the SQLite database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Directory holding rolling log files
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory structure if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
