//! hrms-server: HR management API server

use hrms_server::logging::{self, LogFormat};
use hrms_server::{AppState, BoxError, Config, api, error};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    logging::init(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));

    let config = Config::from_env()?;
    error::expose_internal_errors(config.is_development());
    tracing::info!("Starting hrms-server (env: {})", config.environment);

    let port = config.http_port;
    let state = AppState::new(config).await?;
    tracing::info!(backend = state.store.backend(), "Storage ready");

    let app = api::build_app(state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("hrms-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hrms-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
