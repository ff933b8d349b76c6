use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpr_tracker::api::router;
use cpr_tracker::client::{ApiConfig, CprHttpClient};
use cpr_tracker::config::ServerConfig;
use cpr_tracker::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cpr_tracker=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::new_from_env()?;
    let server_config = ServerConfig::new_from_env()?;

    info!("using backend at {}", api_config.base_url);
    let client = Arc::new(CprHttpClient::new(api_config)?);
    let app = router(AppState::new(client));

    info!("listening on http://{}", server_config.bind_addr);
    let listener = tokio::net::TcpListener::bind(server_config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
