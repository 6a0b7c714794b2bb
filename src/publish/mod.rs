//! Outbound publishing of ingested payloads.
//!
//! # Data Flow
//! ```text
//! PayloadHandler
//!     → Publisher::publish (non-blocking enqueue)
//!     → queue.rs (bounded mpsc, ChannelPublisher)
//!     → worker.rs (PublishWorker task)
//!     → sink.rs (HTTP POST downstream, or log only)
//! ```
//!
//! # Design Decisions
//! - The HTTP response never waits on delivery (ack-then-publish)
//! - A full queue is reported to the caller, who logs it and moves on
//! - No retries: delivery guarantees belong to the downstream system

pub mod queue;
pub mod sink;
pub mod worker;

pub use queue::ChannelPublisher;
pub use sink::{DeliveryError, HttpSink, Sink};
pub use worker::PublishWorker;

use crate::ingest::IngestedPayload;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("publish queue is full")]
    QueueFull,
    #[error("publish worker has stopped")]
    Closed,
}

/// Hands a completed payload to downstream delivery.
///
/// Implementations must return promptly; delivery happens elsewhere.
pub trait Publisher: Send + Sync {
    fn publish(&self, payload: IngestedPayload) -> Result<(), PublishError>;
}
