//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the webhook route
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener with peer address info
//! - Graceful shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{Environment, IngressConfig};
use crate::http::error::IngressError;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::not_found;
use crate::ingest::PayloadHandler;
use crate::publish::Publisher;
use crate::security::IpAllowList;

/// HTTP server for the webhook ingress.
pub struct HttpServer {
    router: Router,
    config: IngressConfig,
}

impl HttpServer {
    /// Create a new HTTP server.
    ///
    /// The allow-list and response body are read from `env` once, here.
    pub fn new(config: IngressConfig, env: &Environment, publisher: Arc<dyn Publisher>) -> Self {
        let gate = IpAllowList::from_env(env);
        if gate.allows_everyone() {
            tracing::info!("No IP allow-list configured, accepting every caller");
        } else {
            tracing::info!(allowed = ?gate.entries(), "IP allow-list active");
        }

        let handler = PayloadHandler::new(env, Arc::new(gate), publisher, &config.ingress);
        let router = Self::build_router(&config, handler);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &IngressConfig, handler: PayloadHandler) -> Router {
        Router::new()
            .route(
                &config.ingress.path,
                post(webhook_handler).fallback(not_found_handler),
            )
            .fallback(not_found_handler)
            .with_state(handler)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            path = %self.config.ingress.path,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The configured router, without peer address info.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn webhook_handler(
    State(handler): State<PayloadHandler>,
    request: Request<Body>,
) -> Result<Response, IngressError> {
    handler.handle(request).await
}

async fn not_found_handler() -> Response {
    not_found()
}
