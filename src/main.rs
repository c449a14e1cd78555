//! Edge router binary.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!         │
//!         ▼
//!   ┌───────────┐   OPTIONS   ┌────────────┐
//!   │ preflight │────────────▶│ 204 + CORS │
//!   └─────┬─────┘             └────────────┘
//!         ▼
//!   ┌────────────┐  api     ┌─────────────────┐
//!   │ classifier │─────────▶│ API passthrough │────▶ API upstream
//!   └─────┬──────┘          └─────────────────┘
//!         │ static / spa
//!         ▼
//!   ┌──────────────┐  miss  ┌────────┐
//!   │ asset store  │───────▶│ origin │
//!   └──────┬───────┘        └────────┘
//!          ▼
//!   asset / shell / fallback page
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_router::config::{read_config, validate_config, EdgeConfig};
use edge_router::lifecycle::{build_server, shutdown_signal, Shutdown};
use edge_router::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "edge-router", version, about = "SPA edge router")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the asset directory
    #[arg(long)]
    assets_dir: Option<String>,

    /// Override the origin base URL
    #[arg(long)]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => EdgeConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(dir) = args.assets_dir {
        config.assets.dir = Some(dir);
    }
    if let Some(origin) = args.origin {
        config.origin.base_url = Some(origin);
    }

    logging::init_logging(&config.observability.log_level);

    if let Err(errors) = validate_config(&config) {
        for error in &errors {
            tracing::error!(field = %error.field, message = %error.message, "Invalid configuration");
        }
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        request_timeout_secs = config.timeouts.request_secs,
        "edge-router starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = build_server(config)?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on(shutdown_signal()));

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
