//! Buho API Proxy
//!
//! A small reverse proxy in front of the Buho WhatsApp API, built with Tokio
//! and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                 BUHO PROXY                   │
//!   Client Request      │  ┌─────────┐   ┌───────────┐   ┌──────────┐  │
//!   ────────────────────┼─▶│  http   │──▶│ forwarder │──▶│ upstream │──┼──▶ Buho API
//!                       │  │ server  │   │           │   │  client  │  │    (relaxed TLS)
//!   Client Response     │  └─────────┘   └───────────┘   └──────────┘  │
//!   ◀───────────────────┼──  JSON reply or {error, details} envelope   │
//!                       │                                              │
//!                       │  config · observability · security · lifecycle
//!                       └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use buho_proxy::config::load_config_or_default;
use buho_proxy::lifecycle::startup;
use buho_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "buho-proxy")]
#[command(about = "Reverse proxy for the Buho WhatsApp API", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults plus environment are used without it.
    #[arg(short, long, env = "BUHO_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("buho-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
