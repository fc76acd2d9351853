//! Client IP extraction for click records.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Returns the client IP of a request.
///
/// Behind a trusted proxy the first address of `X-Forwarded-For`, then
/// `X-Real-IP`, is used when it parses as an IP. Otherwise, and whenever the
/// headers are absent or malformed, the socket peer address is used.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(parse_ip);
        let real_ip = || {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_ip)
        };

        if let Some(ip) = forwarded.or_else(real_ip) {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim().parse().ok()
}
