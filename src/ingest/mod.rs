//! Webhook payload ingestion.
//!
//! # Data Flow
//! ```text
//! POST {ingress.path}
//!     → handler.rs (gate check, drain body in arrival order)
//!     → payload.rs (IngestedPayload)
//!     → Publisher::publish
//!     → reply.rs (ResponseDecision: DEFAULT_RESPONSE or "OK")
//! ```

pub mod handler;
pub mod payload;
pub mod reply;

pub use handler::PayloadHandler;
pub use payload::IngestedPayload;
pub use reply::ResponseDecision;
