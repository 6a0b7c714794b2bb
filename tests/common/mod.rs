//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use tokio::net::TcpListener;

use webhook_ingress::config::{Environment, IngressConfig};
use webhook_ingress::lifecycle::{self, Shutdown};

/// A request received by the capture backend.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    received: Arc<Mutex<Vec<Captured>>>,
}

/// Start a downstream backend that records every POST to `/events` and
/// answers with `status`.
pub async fn start_capture_backend(status: StatusCode) -> (SocketAddr, Arc<Mutex<Vec<Captured>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = BackendState {
        status,
        received: received.clone(),
    };

    let app = Router::new()
        .route(
            "/events",
            post(|State(state): State<BackendState>, headers: HeaderMap, body: Bytes| async move {
                state.received.lock().unwrap().push(Captured { headers, body });
                state.status
            }),
        )
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, received)
}

/// Start the ingress on an ephemeral port.
pub async fn start_ingress(
    config: IngressConfig,
    env: &[(&str, &str)],
) -> (SocketAddr, Shutdown, tokio::task::JoinHandle<()>) {
    let env: Environment = env.iter().copied().collect();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();

    let server_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move {
        lifecycle::serve(config, &env, listener, &server_shutdown)
            .await
            .unwrap();
    });

    (addr, shutdown, handle)
}

/// Poll `received` until it holds `count` entries or a second passes.
pub async fn wait_for(received: &Arc<Mutex<Vec<Captured>>>, count: usize) -> Vec<Captured> {
    for _ in 0..50 {
        {
            let received = received.lock().unwrap();
            if received.len() >= count {
                return received.clone();
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    received.lock().unwrap().clone()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
