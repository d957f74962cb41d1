//! Lead capture server
//!
//! Serves the contact form and forwards validated leads to the configured sink.

use anyhow::Context;
use lead_capture_server::{
    config::ServerConfig, router::build_router, sinks::build_sink, state::AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lead_capture_server=info,lead_capture_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let sink = build_sink(&config).context("failed to build lead sink")?;
    let state = AppState::new(sink).context("failed to compile contact template")?;
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    tracing::info!("Lead capture server listening on http://{}", config.bind_addr);
    tracing::info!("  GET  /                  - contact form");
    tracing::info!("  POST /contact           - form submission");
    tracing::info!("  POST /api/leads         - JSON submission");
    tracing::info!("  GET  /api/lead-options  - choice sets");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
