//! Caller address resolution.
//!
//! The effective caller address is taken from `x-forwarded-for` when a
//! proxy set exactly one value, and from the TCP peer otherwise.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{request::Parts, HeaderMap};

/// Header set by the fronting proxy.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Prefix the OS puts in front of IPv4 peers accepted on a dual-stack socket.
const IPV4_MAPPED_PREFIX: &str = "::ffff:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Unexpected value for x-forwarded-for: header sent {0} times")]
    MultiValuedForwardingHeader(usize),
    #[error("Unexpected value for x-forwarded-for: not visible ASCII")]
    InvalidForwardingHeader,
    #[error("request ip not determined")]
    AddressUndetermined,
}

/// The address-revealing fields of one request.
#[derive(Debug, Clone, Copy)]
pub struct CallerInfo<'a> {
    pub headers: &'a HeaderMap,
    pub remote_addr: Option<SocketAddr>,
}

impl<'a> CallerInfo<'a> {
    pub fn new(headers: &'a HeaderMap, remote_addr: Option<SocketAddr>) -> Self {
        Self {
            headers,
            remote_addr,
        }
    }

    /// Read the headers and the peer address recorded by
    /// `into_make_service_with_connect_info`.
    pub fn from_parts(parts: &'a Parts) -> Self {
        let remote_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Self::new(&parts.headers, remote_addr)
    }
}

/// Resolve the effective caller address for one request.
pub fn resolve_caller_address(caller: &CallerInfo<'_>) -> Result<String, AddressError> {
    let mut forwarded = caller.headers.get_all(X_FORWARDED_FOR).iter();
    match (forwarded.next(), forwarded.next()) {
        (Some(value), None) => {
            let value = value
                .to_str()
                .map_err(|_| AddressError::InvalidForwardingHeader)?;
            if !value.is_empty() {
                return Ok(value.to_string());
            }
        }
        (Some(_), Some(_)) => {
            let count = caller.headers.get_all(X_FORWARDED_FOR).iter().count();
            return Err(AddressError::MultiValuedForwardingHeader(count));
        }
        (None, _) => {}
    }

    tracing::info!(remote_addr = ?caller.remote_addr, "Resolving caller from socket address");

    let remote = caller
        .remote_addr
        .map(|addr| strip_ipv4_mapped(&addr.ip().to_string()).to_string())
        .unwrap_or_default();

    if remote.is_empty() {
        return Err(AddressError::AddressUndetermined);
    }
    Ok(remote)
}

fn strip_ipv4_mapped(ip: &str) -> &str {
    ip.strip_prefix(IPV4_MAPPED_PREFIX).unwrap_or(ip)
}
