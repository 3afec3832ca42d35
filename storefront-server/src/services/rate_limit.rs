//! Fixed-window rate limiting
//!
//! Best-effort, in-process throttling: entries live in a DashMap keyed by
//! client identifier and are swept opportunistically every 100 calls.
//! State is not shared across instances - a horizontally scaled
//! deployment needs a shared store behind the same interface.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use http::HeaderMap;

use crate::utils::time::now_millis;

/// Sweep expired entries every this many calls
const SWEEP_INTERVAL: u64 = 100;

/// Limits for one window
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: u32,
    /// Window size in milliseconds
    pub window_ms: i64,
}

impl Default for RateLimitConfig {
    /// 5 requests per minute
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_ms: 60_000,
        }
    }
}

/// Outcome of a limit check
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests left in the current window
    pub remaining: u32,
    /// When the current window resets (epoch millis)
    pub reset_at_ms: i64,
}

impl RateLimitDecision {
    /// Seconds the caller should wait before retrying (for `Retry-After`)
    pub fn retry_after_secs(&self, now_ms: i64) -> i64 {
        ((self.reset_at_ms - now_ms) as f64 / 1000.0).ceil() as i64
    }
}

#[derive(Debug)]
struct Entry {
    count: u32,
    reset_at_ms: i64,
}

/// In-process fixed-window limiter
#[derive(Debug, Default)]
pub struct RateLimiter {
    entries: DashMap<String, Entry>,
    calls: AtomicU64,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            calls: AtomicU64::new(0),
        }
    }

    /// Check and count one request for `identifier`. Never fails.
    pub fn check(&self, identifier: &str, config: &RateLimitConfig) -> RateLimitDecision {
        self.check_at(identifier, config, now_millis())
    }

    fn check_at(&self, identifier: &str, config: &RateLimitConfig, now: i64) -> RateLimitDecision {
        // Opportunistic sweep. Must happen before the entry lock below -
        // retain() on the same shard would deadlock.
        let calls = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if calls % SWEEP_INTERVAL == 0 {
            self.entries.retain(|_, entry| entry.reset_at_ms >= now);
        }

        let mut entry = self
            .entries
            .entry(identifier.to_owned())
            .or_insert(Entry {
                count: 0,
                reset_at_ms: 0,
            });

        // Fresh identifier or expired window: start a new window
        if entry.count == 0 || entry.reset_at_ms < now {
            entry.count = 1;
            entry.reset_at_ms = now + config.window_ms;
            return RateLimitDecision {
                allowed: true,
                remaining: config.max_requests.saturating_sub(1),
                reset_at_ms: entry.reset_at_ms,
            };
        }

        // Window still open and already at the limit: deny, reporting the
        // existing reset time so the caller can compute retry-after
        if entry.count >= config.max_requests {
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at_ms: entry.reset_at_ms,
            };
        }

        entry.count += 1;
        RateLimitDecision {
            allowed: true,
            remaining: config.max_requests - entry.count,
            reset_at_ms: entry.reset_at_ms,
        }
    }
}

/// Derive a rate-limit identifier from request headers.
///
/// `x-forwarded-for` can be comma-separated; the first entry is the
/// original client. Requests with no usable header all share the
/// fallback bucket - fail-open by design.
pub fn client_identifier(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(value) = real_ip.to_str()
        && !value.is_empty()
    {
        return value.to_owned();
    }

    "unknown-client".to_owned()
}
