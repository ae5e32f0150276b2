use std::sync::Arc;

use stocktrack_api::app::{self, config::ApiConfig, services::AppServices};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stocktrack_observability::init();

    let config = ApiConfig::from_env()?;

    let services = AppServices::new();
    if config.seed_demo {
        services.seed_demo()?;
        tracing::info!("demo inventory loaded");
    }

    let app = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
