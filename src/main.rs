//! Request logger demo server.
//!
//! ```text
//!     Client Request
//!     ───────────────▶ RequestLoggerLayer ──▶ recorder ──▶ handler
//!                            │
//!                            ▼
//!                     access log sink (stderr/stdout, text or JSON)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_logger::config::{load_config, ServerConfig};
use request_logger::http::server::shutdown_signal;
use request_logger::http::HttpServer;
use request_logger::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "HTTP server that writes one access log line per request", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit JSON access log lines regardless of the config file.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if cli.json {
        config.access_log.enable_log_as_json = true;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        destination = ?config.access_log.destination,
        json = config.access_log.enable_log_as_json,
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

    let server = HttpServer::new(config);
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
