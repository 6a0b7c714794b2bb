//! Delivery targets for published payloads.

use std::time::Duration;

use axum::http::header::CONTENT_TYPE;

use crate::http::request::X_REQUEST_ID;
use crate::ingest::IngestedPayload;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("downstream answered {0}")]
    Status(reqwest::StatusCode),
}

/// Where the worker sends payloads.
#[derive(Debug, Clone)]
pub enum Sink {
    Http(HttpSink),
    /// Record the payload in the log only.
    Log,
}

impl Sink {
    pub async fn deliver(&self, payload: &IngestedPayload) -> Result<(), DeliveryError> {
        match self {
            Sink::Http(sink) => sink.deliver(payload).await,
            Sink::Log => {
                tracing::info!(
                    request_id = payload.request_id.as_deref().unwrap_or("unknown"),
                    bytes = payload.body.len(),
                    "Payload received (no publisher endpoint configured)"
                );
                Ok(())
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sink::Http(_) => "http",
            Sink::Log => "log",
        }
    }
}

/// POSTs each payload to a downstream URL.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl HttpSink {
    pub fn new(endpoint: url::Url, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &url::Url {
        &self.endpoint
    }

    async fn deliver(&self, payload: &IngestedPayload) -> Result<(), DeliveryError> {
        let mut request = self.client.post(self.endpoint.clone()).body(payload.body.clone());
        if let Some(content_type) = &payload.content_type {
            request = request.header(CONTENT_TYPE.as_str(), content_type.as_str());
        }
        if let Some(request_id) = &payload.request_id {
            request = request.header(X_REQUEST_ID, request_id.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status));
        }
        Ok(())
    }
}
