//! Formgen API server entry point

use std::sync::Arc;

use formgen_core::{Config, FormService};
use tracing::info;
use tracing_subscriber::EnvFilter;

use formgen_api::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let service = FormService::from_config(&config)?;
    let state = AppState::new(Arc::new(service));

    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, version = formgen_core::VERSION, "formgen API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
