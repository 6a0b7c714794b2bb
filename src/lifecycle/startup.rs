//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the publish queue and its sink from configuration
//! - Start the publish worker before accepting traffic
//! - Run the HTTP server until shutdown, then let the worker drain
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener is bound by the caller, so tests can pick ports

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::{Environment, IngressConfig, PublisherConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::publish::{ChannelPublisher, DeliveryError, HttpSink, PublishWorker, Sink};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid publisher endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("failed to build publisher client: {0}")]
    Publisher(#[from] DeliveryError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Choose the delivery sink for the configured publisher.
pub fn build_sink(config: &PublisherConfig) -> Result<Sink, StartupError> {
    match &config.endpoint {
        Some(endpoint) => {
            let url = url::Url::parse(endpoint)?;
            let sink = HttpSink::new(url, Duration::from_secs(config.timeout_secs))?;
            tracing::info!(endpoint = %sink.endpoint(), "Publishing payloads over HTTP");
            Ok(Sink::Http(sink))
        }
        None => {
            tracing::warn!("No publisher endpoint configured, payloads will only be logged");
            Ok(Sink::Log)
        }
    }
}

/// Serve the webhook on `listener` until `shutdown` triggers.
///
/// Returns after the server has stopped and every queued payload has been
/// handed to the sink.
pub async fn serve(
    config: IngressConfig,
    env: &Environment,
    listener: TcpListener,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let sink = build_sink(&config.publisher)?;
    let (publisher, rx) = ChannelPublisher::new(config.publisher.queue_capacity);
    let worker = tokio::spawn(PublishWorker::new(rx, sink).run());

    let server = HttpServer::new(config, env, Arc::new(publisher));
    let result = server.run(listener, shutdown.subscribe()).await;

    // The server owned the last publisher handle; the worker exits once drained.
    if let Err(e) = worker.await {
        tracing::error!(error = %e, "Publish worker panicked");
    }

    result.map_err(StartupError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_selection() {
        let config = PublisherConfig::default();
        assert!(matches!(build_sink(&config).unwrap(), Sink::Log));

        let config = PublisherConfig {
            endpoint: Some("http://127.0.0.1:9000/events".into()),
            ..Default::default()
        };
        assert!(matches!(build_sink(&config).unwrap(), Sink::Http(_)));

        let config = PublisherConfig {
            endpoint: Some("not a url".into()),
            ..Default::default()
        };
        assert!(matches!(build_sink(&config), Err(StartupError::Endpoint(_))));
    }
}
