//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the ingress.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::config::env::{Environment, PORT};

/// Root configuration for the webhook ingress.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct IngressConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Endpoint and body handling.
    pub ingress: IngestConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Outbound publishing of accepted payloads.
    pub publisher: PublisherConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl IngressConfig {
    /// Apply overrides taken from the process environment.
    ///
    /// `PORT` replaces the port of `listener.bind_address` and keeps its host.
    pub fn apply_env(&mut self, env: &Environment) {
        if let Some(port) = env.get_non_blank(PORT) {
            let port = port.trim();
            let host = self
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host)
                .unwrap_or("0.0.0.0");
            self.listener.bind_address = format!("{}:{}", host, port);
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Webhook endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Path the webhook is posted to.
    pub path: String,

    /// Maximum accepted body size in bytes (0 = unlimited).
    pub max_body_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            path: "/webhook".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Outbound publisher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PublisherConfig {
    /// Downstream URL payloads are POSTed to. Payloads are only logged when unset.
    pub endpoint: Option<String>,

    /// Per-delivery timeout in seconds.
    pub timeout_secs: u64,

    /// Number of payloads that may wait for delivery.
    pub queue_capacity: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 5,
            queue_capacity: 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: IngressConfig = toml::from_str(
            r#"
            [ingress]
            path = "/hooks/github"

            [publisher]
            endpoint = "http://127.0.0.1:9000/events"
            "#,
        )
        .unwrap();

        assert_eq!(config.ingress.path, "/hooks/github");
        assert_eq!(config.ingress.max_body_size, 2 * 1024 * 1024);
        assert_eq!(config.publisher.endpoint.as_deref(), Some("http://127.0.0.1:9000/events"));
        assert_eq!(config.publisher.queue_capacity, 1024);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_port_override() {
        let mut config = IngressConfig::default();
        config.listener.bind_address = "127.0.0.1:8080".into();

        config.apply_env(&[("PORT", "3000")].into_iter().collect());
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");

        config.apply_env(&[("PORT", " ")].into_iter().collect());
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
    }
}
