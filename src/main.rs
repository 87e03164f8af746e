//! The tab store's web server.

use std::{future, sync::Arc};

use tab_store::{
    config::Config,
    service::{self, AppState, TABS_PATH},
    store::TabStore,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// # Errors
///
/// See implementation.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // This loads `.env` before the log filter is read from the environment.
    let config = Config::from_env()?;

    init_tracing();

    if config.secret.is_none() {
        warn!("`SECRET` isn't set, so all tab uploads will be rejected");
    }

    let store = TabStore::load(config.tabs_file.clone()).await;
    let state = Arc::new(AppState::new(store, &config));

    let listener = TcpListener::bind(&config.address).await?;

    info!("Listening on http://{}{TABS_PATH}", config.address);

    axum::serve(listener, service::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG` (defaulting to `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(error) = signal::ctrl_c().await {
        warn!(%error, "Unable to listen for shutdown signal");
        future::pending::<()>().await;
    }

    info!("Shutting down");
}
