mod application;
mod config;
mod contacts;
mod errors;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::form::SubmissionSettings;
use crate::application::latch::SubmissionLatch;
use crate::config::Config;
use crate::contacts::BrevoClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting apply-api v{}", env!("CARGO_PKG_VERSION"));

    let contacts = BrevoClient::new(config.brevo_api_url.clone(), config.brevo_api_key.clone())?;
    info!(
        "Brevo client initialized (list {}, {})",
        config.brevo_list_id, config.brevo_api_url
    );

    let submission = SubmissionSettings::new(config.brevo_list_id, &config.confirmation_url())?;

    let state = AppState {
        contacts: Arc::new(contacts),
        submission,
        latch: SubmissionLatch::default(),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
