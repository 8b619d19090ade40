//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters for one group of routes.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub per_second: u64,
    pub burst: u32,
}

/// Quota for public endpoints: 2 requests per second, burst of 100.
pub const PUBLIC: Quota = Quota {
    per_second: 2,
    burst: 100,
};

/// Stricter quota for credential endpoints: 1 request per second, burst of 10.
pub const CREDENTIALS: Quota = Quota {
    per_second: 1,
    burst: 10,
};

/// Wraps `router` in a per-client-IP rate limiter.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// With `behind_proxy`, the client IP is read from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded` before falling back to the peer address.
/// Enable only behind a trusted reverse proxy. Otherwise the socket peer
/// address is used, which requires serving with connect info.
///
/// # Example
///
/// ```rust,ignore
/// let auth = rate_limit::apply(auth_routes(), rate_limit::CREDENTIALS, false);
/// ```
pub fn apply(router: Router<AppState>, quota: Quota, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(proxy_layer(quota))
    } else {
        router.layer(peer_layer(quota))
    }
}

fn peer_layer(
    quota: Quota,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(quota.per_second)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

fn proxy_layer(
    quota: Quota,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(quota.per_second)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota is non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
