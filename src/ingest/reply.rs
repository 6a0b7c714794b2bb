//! Success response body.

use std::sync::Arc;

use crate::config::env::{Environment, DEFAULT_RESPONSE};

const DEFAULT_ACK: &str = "OK";

/// Body sent for every accepted request, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDecision(Arc<str>);

impl ResponseDecision {
    /// `DEFAULT_RESPONSE` when set and non-empty, otherwise `OK`.
    pub fn from_env(env: &Environment) -> Self {
        let text = env
            .get(DEFAULT_RESPONSE)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ACK);
        Self(Arc::from(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
