use anyhow::{Context, Result};
use api::{
    config::{AppConfig, LoggingConfig},
    create_router,
    state::AppState,
};
use nlp::{Annotator, SpacyClient};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.logging);

    // Load the annotation engine before accepting traffic
    let engine = SpacyClient::new(
        config.engine.base_url.clone(),
        config.engine.model.clone(),
        config.engine.timeout(),
    )?;
    if let Err(e) = engine.ensure_ready().await {
        tracing::error!(error = ?e, "Annotation engine failed to load");
        return Err(e.context("Annotation engine failed to load"));
    }

    let state = Arc::new(AppState::new(Arc::new(engine)));

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("MindMapr API listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
