mod auth;
mod config;
mod database;
mod entities;
mod error;
mod gateway;
mod mailer;
mod media;
mod router;
mod routes;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::database::setup_database;
use crate::gateway::GatewayClient;
use crate::mailer::Mailer;
use crate::media::MediaClient;
use crate::router::{AppState, create_router, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = setup_database(&config.database_url).await?;

    let state = AppState {
        db,
        gateway: GatewayClient::new(config.gateway.clone()),
        media: MediaClient::new(config.media.clone()),
        mailer: Mailer::new(&config.smtp)?,
    };

    let app = create_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("server is running on port {}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
