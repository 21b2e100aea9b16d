//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header::RETRY_AFTER, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::{net::SocketAddr, num::NonZeroU32, sync::Arc, time::Duration};

use crate::config::RateLimitConfig;
use crate::web::error::ApiError;

/// Interval between sweeps of idle client entries.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request may proceed.
    Allowed,
    /// The client is over its quota.
    Denied {
        /// Time until the next request would be accepted.
        retry_after: Duration,
    },
}

impl RateLimitDecision {
    /// Check if the request is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Per-client rate limiter for the contact endpoint.
///
/// Each client key may spend `max_requests` at once; a spent slot comes back
/// one full window later, so no window-long span admits more than
/// `max_requests`.
pub struct RateLimitState {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(config: &RateLimitConfig) -> Self {
        let max = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(config.window())
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(max);

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }

    /// Check and count a request for the given client key.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => RateLimitDecision::Allowed,
            Err(not_until) => RateLimitDecision::Denied {
                retry_after: not_until.wait_time_from(self.clock.now()),
            },
        }
    }

    /// Drop entries for clients whose quota has fully replenished.
    pub fn cleanup(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Start a background task to periodically clean up old entries.
    pub fn start_cleanup_task(self: Arc<Self>) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            // Skip the first immediate tick
            interval.tick().await;
            loop {
                interval.tick().await;
                self.cleanup();
                tracing::debug!(clients = self.tracked_clients(), "Rate limiter cleaned up");
            }
        });
    }
}

/// Extract the client key from a request.
///
/// Uses the first `X-Forwarded-For` entry, then `X-Real-IP`, then the peer
/// address.
pub fn client_key(req: &Request<Body>) -> String {
    // Try X-Forwarded-For header first (for reverse proxy)
    if let Some(forwarded) = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
    {
        // Take the first IP in the chain
        if let Some(ip) = forwarded.split(',').next().map(str::trim) {
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    // Try X-Real-IP header
    if let Some(real_ip) = req
        .headers()
        .get("X-Real-IP")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
    {
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    // Fall back to connection info
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    // Default to unknown
    "unknown".to_string()
}

/// Rate limiting middleware for the contact endpoint.
pub async fn contact_rate_limit(
    state: Arc<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = client_key(&req);

    if let RateLimitDecision::Denied { retry_after } = state.check(&key) {
        tracing::warn!(
            client = %key,
            retry_after_secs = retry_after.as_secs(),
            "Contact rate limit exceeded"
        );
        let mut response = ApiError::too_many_requests().into_response();
        // Round up so clients never retry a moment too early.
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(secs.max(1)));
        return response;
    }

    next.run(req).await
}
