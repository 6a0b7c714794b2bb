//! Webhook ingress library.
//!
//! A single POST endpoint guarded by an IP allow-list. Accepted payloads are
//! drained, acknowledged and queued for delivery to a downstream system.

pub mod config;
pub mod http;
pub mod ingest;
pub mod lifecycle;
pub mod observability;
pub mod publish;
pub mod security;

pub use config::{Environment, IngressConfig};
pub use http::HttpServer;
pub use ingest::PayloadHandler;
pub use lifecycle::Shutdown;
pub use security::IpAllowList;
