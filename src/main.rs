//! Webhook ingress.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                WEBHOOK INGRESS                │
//!                         │                                               │
//!   POST /webhook         │  ┌─────────┐    ┌──────────┐    ┌──────────┐  │
//!   ──────────────────────┼─▶│  http   │───▶│ security │───▶│  ingest  │  │
//!                         │  │ server  │    │allow-list│    │ handler  │  │
//!                         │  └─────────┘    └────┬─────┘    └────┬─────┘  │
//!                         │                      │ 404           │        │
//!   200 OK / 404          │◀─────────────────────┘               ▼        │
//!   ◀─────────────────────┼──────────────────────────────── ┌──────────┐  │
//!                         │                                 │ publish  │──┼──▶ Downstream
//!                         │                                 │  queue   │  │
//!                         │                                 └──────────┘  │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use webhook_ingress::config::{load_config, validation::validate_config, Environment, IngressConfig};
use webhook_ingress::lifecycle::{self, Shutdown};
use webhook_ingress::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "webhook-ingress")]
#[command(about = "IP allow-listed webhook endpoint", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let env = Environment::from_process();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => IngressConfig::default(),
    };
    config.apply_env(&env);
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(webhook_ingress::config::ConfigError::Validation)?;

    logging::init_tracing(&config.observability.log_level);
    tracing::info!("webhook-ingress v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        path = %config.ingress.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    lifecycle::serve(config, &env, listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
