//! Background delivery task.

use tokio::sync::mpsc;

use crate::ingest::IngestedPayload;
use crate::observability::metrics;
use crate::publish::Sink;

/// Drains the publish queue into a [`Sink`].
pub struct PublishWorker {
    rx: mpsc::Receiver<IngestedPayload>,
    sink: Sink,
}

impl PublishWorker {
    pub fn new(rx: mpsc::Receiver<IngestedPayload>, sink: Sink) -> Self {
        Self { rx, sink }
    }

    /// Deliver payloads one at a time until every publisher is dropped.
    /// Payloads still queued at that point are delivered before returning.
    pub async fn run(mut self) {
        tracing::info!(sink = self.sink.name(), "Publish worker started");

        while let Some(payload) = self.rx.recv().await {
            self.deliver(payload).await;
        }

        tracing::info!("Publish worker stopped");
    }

    async fn deliver(&self, payload: IngestedPayload) {
        match self.sink.deliver(&payload).await {
            Ok(()) => {
                tracing::debug!(
                    request_id = payload.request_id.as_deref().unwrap_or("unknown"),
                    bytes = payload.body.len(),
                    "Payload delivered"
                );
                metrics::record_delivery("ok");
            }
            Err(e) => {
                tracing::error!(
                    request_id = payload.request_id.as_deref().unwrap_or("unknown"),
                    error = %e,
                    "Payload delivery failed"
                );
                metrics::record_delivery("error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};

    use crate::publish::{ChannelPublisher, HttpSink, Publisher};

    /// Downstream that records POSTed bodies and answers with `status`.
    async fn capture_backend(status: StatusCode) -> (url::Url, Arc<Mutex<Vec<Bytes>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/events",
                post(
                    move |State(received): State<Arc<Mutex<Vec<Bytes>>>>, body: Bytes| async move {
                        received.lock().unwrap().push(body);
                        status
                    },
                ),
            )
            .with_state(received.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let url = format!("http://{}/events", addr).parse().unwrap();
        (url, received)
    }

    fn http_sink(url: url::Url) -> Sink {
        Sink::Http(HttpSink::new(url, Duration::from_secs(2)).unwrap())
    }

    #[tokio::test]
    async fn test_queued_payloads_delivered_before_exit() {
        let (url, received) = capture_backend(StatusCode::OK).await;
        let (publisher, rx) = ChannelPublisher::new(4);

        publisher.publish(IngestedPayload::new(Bytes::from_static(b"a"))).unwrap();
        publisher.publish(IngestedPayload::new(Bytes::from_static(b"b"))).unwrap();
        drop(publisher);

        tokio::time::timeout(Duration::from_secs(5), PublishWorker::new(rx, http_sink(url)).run())
            .await
            .expect("worker should exit once publishers are gone");

        assert_eq!(
            *received.lock().unwrap(),
            vec![Bytes::from_static(b"a"), Bytes::from_static(b"b")]
        );
    }

    #[tokio::test]
    async fn test_failed_delivery_not_retried() {
        let (url, received) = capture_backend(StatusCode::INTERNAL_SERVER_ERROR).await;
        let (publisher, rx) = ChannelPublisher::new(4);
        let handle = tokio::spawn(PublishWorker::new(rx, http_sink(url)).run());

        publisher.publish(IngestedPayload::new(Bytes::from_static(b"first"))).unwrap();
        publisher.publish(IngestedPayload::new(Bytes::from_static(b"second"))).unwrap();
        drop(publisher);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker should exit")
            .unwrap();

        // Each payload attempted exactly once; a failure does not stop the worker.
        assert_eq!(
            *received.lock().unwrap(),
            vec![Bytes::from_static(b"first"), Bytes::from_static(b"second")]
        );
    }
}
