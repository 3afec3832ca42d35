//! Admin authentication
//!
//! Stateless signed session tokens (HS256 JWT) gate the admin API. The
//! trade accepted over stored sessions: no storage round-trip per
//! request, no server-side revocation before expiry - logout is client
//! token disposal.

pub mod middleware;
pub mod session;

pub use middleware::require_admin;
pub use session::{AdminSession, SessionConfig, SessionError, SessionService};
