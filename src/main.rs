use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dog_api::{create_router, init_metrics, AppConfig, DogRepository};

#[tokio::main]
async fn main() -> Result<()> {
    let metrics_handle = init_metrics();

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dog_api=debug,tower_http=debug".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    let repository = Arc::new(DogRepository::from_config(&config.database).await?);
    info!("Database connection pool initialized");

    sqlx::migrate!("./migrations").run(repository.pool()).await?;
    info!("Database migrations applied");

    let router = create_router(Arc::clone(&repository), metrics_handle);
    let port = config.server.effective_port();
    let addr = format!("{}:{}", config.server.host, port);
    let listener = TcpListener::bind(&addr).await?;
    info!(host = %config.server.host, port = port, "API server listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "API server error");
        }
    });

    signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server_handle.abort();
    info!("Application stopped");
    Ok(())
}
