use staffdesk_server::{AppState, Config, build_app, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Refuse to start on a missing or weak secret
    let config = Config::from_env()?;

    init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    if config.is_development() && std::env::var("JWT_SECRET").is_err() {
        tracing::warn!("Using an ephemeral JWT secret; sessions end when the process restarts");
    }

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Starting staffdesk-server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let state = AppState::initialize(&config).await?;
    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
