//! Storefront Server - order intake and inventory back-office
//!
//! # Architecture overview
//!
//! A small-business storefront backend: customers submit "request to
//! order" carts (no live payment processing), and staff manage the
//! catalog, inventory ledger, recorded sales, and incoming requests
//! through an authenticated admin API.
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # session tokens, admin middleware
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # order intake payloads + validation
//! ├── services/      # rate limiter, notifications
//! ├── db/            # SQLite pool, models, repositories
//! └── utils/         # errors, logging, helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::SessionService;
pub use core::{Config, Server, ServerState, build_router};
pub use services::{NotificationService, RateLimiter};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; environment variables win
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
