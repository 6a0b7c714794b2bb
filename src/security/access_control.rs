//! Caller allow-list.
//! Rejects callers whose resolved address is not listed in `IP_WHITELIST`.

use axum::response::Response;

use crate::config::env::{Environment, IP_WHITELIST};
use crate::http::response::not_found;
use crate::observability::metrics;
use crate::security::address::{resolve_caller_address, AddressError, CallerInfo};

const WILDCARD: &str = "*";

/// Outcome of a gate check.
#[derive(Debug)]
pub enum Decision {
    Allowed,
    /// The request is finished; the response was produced by the gate and
    /// must be sent as-is without running any further handler.
    Rejected(Response),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Decides whether a caller may use the endpoint.
pub trait Gate: Send + Sync {
    fn decide(&self, caller: &CallerInfo<'_>) -> Result<Decision, AddressError>;
}

/// Exact-match address allow-list. Empty means every caller is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpAllowList {
    entries: Vec<String>,
}

impl IpAllowList {
    /// Build from the semicolon-delimited `IP_WHITELIST` value.
    ///
    /// `*` entries are dropped; mixed with concrete addresses a wildcard has
    /// no effect, on its own it leaves the list empty.
    pub fn from_env(env: &Environment) -> Self {
        let entries = match env.get_non_blank(IP_WHITELIST) {
            Some(list) => list
                .split(';')
                .filter(|entry| *entry != WILDCARD)
                .map(|entry| entry.trim().to_string())
                .collect(),
            None => Vec::new(),
        };
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn allows_everyone(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Gate for IpAllowList {
    fn decide(&self, caller: &CallerInfo<'_>) -> Result<Decision, AddressError> {
        if self.allows_everyone() {
            return Ok(Decision::Allowed);
        }

        let requestor_ip = resolve_caller_address(caller)?;

        if self.entries.iter().any(|entry| *entry == requestor_ip) {
            Ok(Decision::Allowed)
        } else {
            tracing::warn!(requestor_ip = %requestor_ip, "Request was blocked by the allow-list");
            metrics::record_rejected();
            Ok(Decision::Rejected(not_found()))
        }
    }
}
