//! Fixed-window per-client rate limiting.
//!
//! Each client IP gets a request counter that resets when its window
//! expires. Localhost traffic bypasses the limiter so local development and
//! health probes are never throttled. State is in-process; a multi-instance
//! deployment limits per instance.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

/// Expired counters are swept on this cadence, piggybacked on checks.
const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct Window {
    count: u32,
    reset_at: Instant,
}

#[derive(Debug)]
struct LimiterState {
    windows: HashMap<String, Window>,
    last_sweep: Instant,
}

/// The outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed; `remaining` requests left in the window.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
    },
    /// The client is over its limit; retry after the given seconds.
    Limited {
        /// Seconds until the window resets.
        retry_after: u64,
    },
}

/// A fixed-window rate limiter keyed by client identifier.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max_requests: u32,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    /// Creates a limiter allowing `max_requests` per `window` per client.
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests,
            state: Mutex::new(LimiterState {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Records a request from `client` and decides whether to allow it.
    pub fn check(&self, client: &str) -> Decision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Decision {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            // A poisoned lock only means another check panicked; the counter
            // data is still usable.
            Err(poisoned) => poisoned.into_inner(),
        };

        if now.duration_since(state.last_sweep) >= SWEEP_INTERVAL {
            state.windows.retain(|_, w| w.reset_at > now);
            state.last_sweep = now;
        }

        let window_len = self.window;
        let entry = state.windows.entry(client.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + window_len,
        });
        if entry.reset_at <= now {
            entry.count = 0;
            entry.reset_at = now + window_len;
        }
        if entry.count >= self.max_requests {
            let retry_after = entry.reset_at.saturating_duration_since(now).as_secs().max(1);
            return Decision::Limited { retry_after };
        }
        entry.count += 1;
        Decision::Allowed {
            remaining: self.max_requests - entry.count,
        }
    }
}

/// Extracts the client IP the way reverse proxies report it, falling back to
/// the socket peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    for header in ["x-forwarded-for", "x-real-ip", "cf-connecting-ip"] {
        if let Some(value) = headers.get(header).and_then(|v| v.to_str().ok()) {
            if let Some(first) = value.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn is_localhost(ip: &str, headers: &HeaderMap) -> bool {
    if matches!(ip, "127.0.0.1" | "::1" | "localhost") {
        return true;
    }
    headers
        .get("host")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|host| {
            host.contains("localhost") || host.contains("127.0.0.1") || host.contains("::1")
        })
}

/// Axum middleware enforcing the per-IP limit on every API route.
pub async fn enforce(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(request.headers(), Some(peer));
    if is_localhost(&ip, request.headers()) {
        return next.run(request).await;
    }
    match state.limiter.check(&ip) {
        Decision::Allowed { .. } => next.run(request).await,
        Decision::Limited { retry_after } => {
            warn!(%ip, retry_after, "rate limit exceeded");
            ApiError::RateLimited(retry_after).into_response()
        }
    }
}
