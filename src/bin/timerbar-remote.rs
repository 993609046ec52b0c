//! timerbar-remote - the remote command service for timerbar
//!
//! Holds a single pending command that the overlay collects via GET /status.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use timerbar::{
    api::create_router,
    config::RemoteArgs,
    state::AppState,
    utils::{logging, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = RemoteArgs::parse();
    logging::init(args.verbose);

    info!("Starting timerbar-remote v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", args.host, args.port);

    let state = Arc::new(AppState::new(args.port, args.host.clone(), args.auth_token.clone()));
    if state.requires_token() {
        info!("Token check enabled for /status, /toggle and /reset");
    } else {
        warn!("No auth token configured, anyone on the network can drive the timer");
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = args.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET      /        - Remote control page");
    info!("  GET      /status  - Deliver and clear the pending command");
    info!("  GET|POST /toggle  - Queue start/pause");
    info!("  GET|POST /reset   - Queue reset");
    info!("  GET      /health  - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
