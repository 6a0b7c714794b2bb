//! Webhook request handler.
//!
//! # Responsibilities
//! - Run the gate before touching the body
//! - Drain the body chunk by chunk, in arrival order
//! - Publish the completed payload and acknowledge exactly once
//!
//! # Design Decisions
//! - Rejected requests never have their body polled
//! - Publish failures are logged; the caller still gets the acknowledgement

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::StreamExt;

use crate::config::{Environment, IngestConfig};
use crate::http::error::IngressError;
use crate::http::request::X_REQUEST_ID;
use crate::http::response::payload_too_large;
use crate::ingest::{IngestedPayload, ResponseDecision};
use crate::observability::metrics;
use crate::publish::Publisher;
use crate::security::{CallerInfo, Decision, Gate};

/// Gate-then-ingest handler for the webhook endpoint.
#[derive(Clone)]
pub struct PayloadHandler {
    gate: Arc<dyn Gate>,
    publisher: Arc<dyn Publisher>,
    reply: ResponseDecision,
    /// 0 = unlimited.
    max_body_size: usize,
}

impl PayloadHandler {
    pub fn new(
        env: &Environment,
        gate: Arc<dyn Gate>,
        publisher: Arc<dyn Publisher>,
        limits: &IngestConfig,
    ) -> Self {
        Self {
            gate,
            publisher,
            reply: ResponseDecision::from_env(env),
            max_body_size: limits.max_body_size,
        }
    }

    pub async fn handle(&self, request: Request<Body>) -> Result<Response, IngressError> {
        let (parts, body) = request.into_parts();

        if let Decision::Rejected(response) = self.gate.decide(&CallerInfo::from_parts(&parts))? {
            metrics::record_request("rejected");
            return Ok(response);
        }

        let request_id = parts
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_type = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match self.drain(body).await? {
            Some(body) => body,
            None => {
                tracing::warn!(
                    request_id = request_id.as_deref().unwrap_or("unknown"),
                    limit = self.max_body_size,
                    "Payload exceeds body size limit"
                );
                metrics::record_request("too_large");
                return Ok(payload_too_large());
            }
        };

        tracing::debug!(
            request_id = request_id.as_deref().unwrap_or("unknown"),
            bytes = body.len(),
            "Payload ingested"
        );

        let payload = IngestedPayload {
            body,
            content_type,
            request_id,
        };
        let request_id = payload.request_id.clone();
        match self.publisher.publish(payload) {
            Ok(()) => metrics::record_publish("queued"),
            Err(e) => {
                tracing::error!(
                    request_id = request_id.as_deref().unwrap_or("unknown"),
                    error = %e,
                    "Failed to publish payload"
                );
                metrics::record_publish("error");
            }
        }

        metrics::record_request("accepted");
        Ok((StatusCode::OK, self.reply.as_str().to_owned()).into_response())
    }

    /// Collect the body. `None` when it grows past the size limit.
    async fn drain(&self, body: Body) -> Result<Option<Bytes>, IngressError> {
        let mut stream = body.into_data_stream();
        let mut buf = Vec::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(IngressError::Body)?;
            if self.max_body_size > 0 && buf.len() + chunk.len() > self.max_body_size {
                return Ok(None);
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(Some(Bytes::from(buf)))
    }
}
