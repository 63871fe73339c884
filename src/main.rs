mod actor_framework;
mod app_system;
mod campaign_actor;
mod clients;
mod config;
mod design_actor;
mod domain;
mod http;
mod ids;
mod notify;
mod order_actor;
mod payment;
mod product_actor;
mod royalty;
mod user_actor;
mod withdrawal_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{error, info};

use crate::app_system::{setup_tracing, ShopSystem};
use crate::config::ShopConfig;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ShopConfig::from_env().map_err(|e| e.to_string())?;

    // Setup tracing once for the entire application
    setup_tracing(config.log_format);
    info!(?config, "Starting dropshop");

    let system = ShopSystem::new(&config);
    let app = http::router(system.app_state());

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind {addr}: {e}"))?;
    info!(%addr, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server error");
    }

    // Shutdown system gracefully
    system.shutdown().await?;
    served.map_err(|e| e.to_string())?;

    info!("Application stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
