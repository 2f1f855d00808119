//! Seathold Server: seat lock manager over HTTP
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the server.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use seathold_core::config::AppConfig;
use seathold_core::AppResult;

/// Seathold: reserve seats with short-lived locks
#[derive(Debug, Parser)]
#[command(name = "seathold-server", version, about, long_about = None)]
struct Cli {
    /// Configuration environment; falls back to SEATHOLD_ENV, then "development"
    #[arg(short, long)]
    env: Option<String>,

    /// Override the number of seats in the pool
    #[arg(long)]
    seats: Option<u32>,

    /// Override the HTTP port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!("Starting Seathold v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = seathold_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load layered configuration and apply command-line overrides
fn load_configuration(cli: &Cli) -> AppResult<AppConfig> {
    let env = cli
        .env
        .clone()
        .or_else(|| std::env::var("SEATHOLD_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    let mut config = AppConfig::load(&env)?;

    if let Some(seats) = cli.seats {
        config.seats.total = seats;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
