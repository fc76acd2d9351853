//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

type Limiter<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Per-client-IP limiter for the shorten endpoint.
///
/// Directly exposed, clients are keyed on the socket peer. Behind a trusted
/// proxy they are keyed on `X-Forwarded-For`, `X-Real-IP` or `Forwarded`,
/// falling back to the peer.
#[derive(Clone)]
pub enum ShortenRateLimit {
    Peer(Limiter<PeerIpKeyExtractor>),
    Forwarded(Limiter<SmartIpKeyExtractor>),
}

impl ShortenRateLimit {
    /// Wraps every route of `router` in the limiter.
    pub fn apply(self, router: Router<AppState>) -> Router<AppState> {
        match self {
            ShortenRateLimit::Peer(limit) => router.layer(limit),
            ShortenRateLimit::Forwarded(limit) => router.layer(limit),
        }
    }
}

/// Builds the shorten limiter.
///
/// A client may send `burst` requests at once and then one more every
/// `per_second` seconds. Excess requests receive `429 Too Many Requests`.
pub fn layer(per_second: u64, burst: u32, behind_proxy: bool) -> Result<ShortenRateLimit> {
    if behind_proxy {
        governor(SmartIpKeyExtractor, per_second, burst).map(ShortenRateLimit::Forwarded)
    } else {
        governor(PeerIpKeyExtractor, per_second, burst).map(ShortenRateLimit::Peer)
    }
}

fn governor<K: KeyExtractor>(key_extractor: K, per_second: u64, burst: u32) -> Result<Limiter<K>> {
    let governor_conf = GovernorConfigBuilder::default()
        .key_extractor(key_extractor)
        .per_second(per_second)
        .burst_size(burst)
        .finish()
        .context("rate limit period and burst size must be non-zero")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
