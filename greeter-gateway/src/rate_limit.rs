//! Fixed-window request counter keyed by client address.
//!
//! Each client gets `max_requests` per `window`. The window starts with the
//! client's first request and resets once it has fully elapsed.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

/// Number of tracked clients above which expired windows are swept.
const SWEEP_THRESHOLD: usize = 4096;

/// Request budget per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed within one window.
    pub max_requests: u32,
    /// Length of a window.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { max_requests: 100, window: Duration::from_secs(60) }
    }
}

#[derive(Debug)]
struct Window {
    count: u32,
    started: Instant,
}

#[derive(Debug)]
struct Windows {
    clients: HashMap<String, Window>,
    last_sweep: Instant,
}

/// Thread-safe per-client request counter.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Mutex<Windows>,
}

impl RateLimiter {
    /// Create a limiter with no tracked clients.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(Windows { clients: HashMap::new(), last_sweep: Instant::now() }),
        }
    }

    /// Count one request from `key` and decide whether it may proceed.
    ///
    /// Returns the remaining budget on success, or the time until the
    /// client's window resets.
    ///
    /// # Errors
    /// Returns the wait duration when the client is over budget.
    ///
    /// # Panics
    /// Panics if the internal `Mutex` is poisoned.
    pub fn check(&self, key: &str) -> Result<u32, Duration> {
        self.check_at(key, Instant::now())
    }

    /// [`check`](Self::check) against an explicit clock reading.
    ///
    /// Expired windows are swept at most once per window length, and only
    /// while the number of tracked clients is at the sweep threshold or above.
    ///
    /// # Errors
    /// Returns the wait duration when the client is over budget.
    ///
    /// # Panics
    /// Panics if the internal `Mutex` is poisoned.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<u32, Duration> {
        let RateLimitConfig { max_requests, window } = self.config;
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        if windows.clients.len() >= SWEEP_THRESHOLD
            && now.saturating_duration_since(windows.last_sweep) >= window
        {
            windows.clients.retain(|_, w| now.saturating_duration_since(w.started) < window);
            windows.last_sweep = now;
        }

        let entry = windows
            .clients
            .entry(key.to_owned())
            .or_insert(Window { count: 0, started: now });
        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= window {
            entry.count = 0;
            entry.started = now;
        }
        if entry.count >= max_requests {
            return Err(window.saturating_sub(elapsed));
        }
        entry.count += 1;
        Ok(max_requests - entry.count)
    }

    /// Number of clients currently tracked.
    ///
    /// # Panics
    /// Panics if the internal `Mutex` is poisoned.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        #[expect(clippy::expect_used, reason = "lock poisoning is unrecoverable")]
        self.windows.lock().expect("rate limiter lock poisoned").clients.len()
    }
}
