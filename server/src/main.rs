use anyhow::Context;
use officedit::DocumentService;
use officedit_server::config::{Config, DEFAULT_LOG_FILTER};
use officedit_server::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env first so RUST_LOG from it is honoured
    let config = Config::load();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    std::fs::create_dir_all(&config.web_root)
        .with_context(|| format!("failed to create web root {}", config.web_root.display()))?;

    let service = DocumentService::new(config.web_root.clone(), config.service_options());
    let app = create_router(AppState::new(service, config.max_upload_bytes));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
