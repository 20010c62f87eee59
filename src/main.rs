// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::mock_api_service::MockApiService;
use crate::application::refresh_service::{spawn_auto_refresh, RefreshService};
use crate::domain::device::Fleet;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::thingspeak_repository::ThingSpeakRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("streetlight_telemetry=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let fleet = Fleet::new(config.fleet.size, &config.fleet.out_of_service);

    // Create repository (infrastructure layer)
    let repository = Arc::new(ThingSpeakRepository::new(
        config.feed.base_url.clone(),
        config.feed.channel_id.clone(),
        config.feed.read_api_key.clone(),
        config.feed.timeout(),
    )?);

    // Create services (application layer)
    let dashboard_service = DashboardService::new(repository, fleet.clone(), config.feed.results);
    let refresh_service = Arc::new(RefreshService::new(
        dashboard_service,
        config.refresh.default_range,
    ));
    let auto_refresh = spawn_auto_refresh(refresh_service.clone(), config.refresh.interval());

    // Create application state
    let state = Arc::new(AppState {
        refresh_service,
        mock_api: MockApiService::new(fleet),
        api_keys: config.api.clone(),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!(
        "Starting streetlight-telemetry on {} (channel {}, refresh every {} ms)",
        addr,
        config.feed.channel_id,
        config.refresh.interval_ms
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    auto_refresh.abort();
    tracing::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
