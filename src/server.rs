use crate::config::{Config, CONFIG_FILE};
use crate::error::{PortfolioError, Result};
use crate::index::generate_index;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::services::ServeDir;

/// State shared with the request handlers
pub struct AppState {
    pub config: Config,
}

/// Build the router serving the rendered page and its static assets
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(generate_index))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
}

/// Run the preview server on the specified port.
///
/// The server only hosts the static page; it has no form endpoint.
///
/// # Arguments
///
/// * `port` - The port number to bind the server to
/// * `config_path` - Configuration file; defaults to `portfolio.json5`
/// * `cancel_token` - Cancelling it shuts the server down gracefully
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be loaded
/// - The address string cannot be parsed into a valid `SocketAddr`
/// - The server fails to bind to the specified address
pub async fn run(
    port: u16,
    config_path: Option<PathBuf>,
    cancel_token: CancellationToken,
) -> Result<()> {
    tracing::info!("Initializing server");

    let config_path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = Config::load_from(&config_path)?;
    let app = router(Arc::new(AppState { config }));

    tracing::debug!("Routes configured");

    let addr = format!("0.0.0.0:{port}");
    let address: SocketAddr = addr.parse()?;
    tracing::info!("Binding server to address: {address}");

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(PortfolioError::ServerRun)?;

    tracing::info!("Site launched on: http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await
        .map_err(PortfolioError::ServerRun)?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
