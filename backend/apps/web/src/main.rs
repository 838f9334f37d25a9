//! Web Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors go through `account::AccountError`.

mod config;

use account::{HttpBackend, account_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::WebConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WebConfig::from_env()?;

    let backend = HttpBackend::new(&config.backend)?;

    tracing::info!(
        base_url = %backend.base_url(),
        timeout_secs = config.backend.timeout.as_secs(),
        "Backend client configured"
    );

    // Build router
    let app = account_router(backend, config.account).layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
