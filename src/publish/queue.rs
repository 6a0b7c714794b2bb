//! Bounded in-process publish queue.

use tokio::sync::mpsc;

use crate::ingest::IngestedPayload;
use crate::publish::{PublishError, Publisher};

/// Sending half of the publish queue.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    tx: mpsc::Sender<IngestedPayload>,
}

impl ChannelPublisher {
    /// Create a publisher and the receiver its worker drains.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<IngestedPayload>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&self, payload: IngestedPayload) -> Result<(), PublishError> {
        self.tx.try_send(payload).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => PublishError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => PublishError::Closed,
        })
    }
}
