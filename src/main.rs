//! # Portfolio Shell Entry Point
//!
//! Renders the portfolio page and serves it, with its static assets, for
//! local preview.
//!
//! The application can be launched with optional command-line arguments:
//!
//! - First argument: Port number (defaults to 3000)
//! - Second argument: Path to configuration file (defaults to "portfolio.json5")
//!
//! ## Example Usage
//!
//! ```bash
//! # Run with default settings (port 3000, default config)
//! cargo run
//!
//! # Run with a specific port and configuration file
//! cargo run 8080 my-portfolio.json5
//! ```
//!
//! Log levels can be controlled through the `RUST_LOG` environment variable.

use portfolio_shell::error::PortfolioError;
use portfolio_shell::{server, telemetry};
use std::env;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), PortfolioError> {
    telemetry::init_tracing();

    let port = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    let config_file_path = env::args().nth(2).map(PathBuf::from);

    tracing::info!("Starting portfolio preview");

    let cancel_token = CancellationToken::new();
    let shutdown = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    server::run(port, config_file_path, cancel_token).await?;

    tracing::info!("Portfolio preview shutting down");
    Ok(())
}
