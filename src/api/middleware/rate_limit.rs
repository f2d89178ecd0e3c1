//! Per-client rate limiting with `tower_governor` token buckets.
//!
//! Buckets are keyed on the socket peer address, so the server must be
//! started with connect info. Requests over the limit get
//! `429 Too Many Requests`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

pub type PeerIpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// One token every `refill`, at most `burst` stored.
fn peer_ip_layer(refill: Duration, burst: u32) -> PeerIpGovernorLayer {
    let config = GovernorConfigBuilder::default()
        .period(refill)
        .burst_size(burst)
        .finish()
        .expect("rate limit period and burst are non-zero");

    GovernorLayer::new(Arc::new(config))
}

/// Limiter for the availability check and the purchase form:
/// 2 requests per second, burst of 30.
///
/// ```rust,ignore
/// let lookup = Router::new()
///     .route("/ajax/check-domain", post(check_domain_handler))
///     .layer(rate_limit::layer());
/// ```
pub fn layer() -> PeerIpGovernorLayer {
    peer_ip_layer(Duration::from_millis(500), 30)
}

/// Limiter for the purchase endpoint, where every accepted request may
/// charge a card: 1 request per 10 seconds, burst of 5.
pub fn purchase_layer() -> PeerIpGovernorLayer {
    peer_ip_layer(Duration::from_secs(10), 5)
}
