//! Sabor Digital API server entry point.

use sabor_api::app;
use sabor_api::config::AppConfig;
use sabor_api::error::AppError;
use sabor_api::telemetry;
use sabor_remote::build_http_client;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let _telemetry = telemetry::init(config.service.name(), config.otlp_endpoint.as_deref())?;

    info!(service = config.service.name(), "Starting Sabor Digital API server");

    let pool = sabor_store::connect(&config.database_url, config.max_connections).await?;
    if config.run_migrations {
        sabor_store::MIGRATOR.run(&pool).await?;
        info!("Migrations applied");
    }
    let http = build_http_client(config.remote_timeout)?;

    let router = app::build_router(&config.service, &pool, &http)
        .layer(TraceLayer::new_for_http())
        .layer(app::cors_layer(&config.cors_origins)?);

    let addr = config.bind_address()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
