use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

use tx_dashboard::fixtures::load_dashboard;
use tx_dashboard::metrics::Metrics;
use tx_dashboard::server::{self, AppState};
use tx_dashboard::trace::AddressBook;
use tx_dashboard::utils::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    println!();
    info!("=========================== INITIALIZING ===========================");

    // Load config
    let config = match load_config("config.yml") {
        Ok(config) => {
            info!("Config loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
            return Err(anyhow!(e));
        }
    };

    // Labels for collected traces
    let address_book = match AddressBook::from_config(&config.labels) {
        Ok(book) => book,
        Err(e) => {
            error!("Failed to load address labels: {}", e);
            return Err(anyhow!(e));
        }
    };

    // Load the transaction shown by the dashboard. Fails fast on a bad fixture.
    let data = match load_dashboard(
        config.fixture_path.as_deref(),
        config.trace_path.as_deref(),
        &address_book,
    ) {
        Ok(data) => data,
        Err(e) => {
            error!("Failed to load transaction data: {:#}", e);
            return Err(e);
        }
    };
    info!(
        "Loaded transaction in block {} with {} call records",
        data.transaction.block,
        data.calls.len()
    );

    let mut state = AppState::new(data).with_indent_unit(config.view.indent_unit);

    // Initialize optional metrics
    if config.metrics.enabled {
        let metrics = Arc::new(Metrics::new()?);
        metrics
            .start_metrics_server(&config.metrics.address, config.metrics.port)
            .await?;
        state = state.with_metrics(metrics);
    } else {
        info!("Metrics are disabled");
    }

    let addr = format!("{}:{}", config.server.address, config.server.port)
        .parse::<SocketAddr>()
        .context("invalid server address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    println!();
    info!("========================= STARTING DASHBOARD =======================");
    info!("Serving dashboard at http://{}", addr);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C signal, initiating shutdown..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
