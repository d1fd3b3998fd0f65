use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::info;

use wealthwave_api::{app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wealthwave_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    info!(
        environment = %config.environment,
        llm_provider = ?config.llm.provider,
        llm_model = %config.llm.model,
        "configuration loaded"
    );

    let state = AppState::new(&config).await?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
