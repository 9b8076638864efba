use std::sync::Arc;

use anyhow::Context;

use expiry_api::{ApiConfig, app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    expiry_observability::init();

    let config = ApiConfig::from_env();
    let services = app::services::build_services(&config)
        .await
        .context("failed to wire services")?;

    let router = app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.http_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
