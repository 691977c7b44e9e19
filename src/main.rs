//! Main entry point for the VHD application.
//!
//! Boots the REST API server (health check, chat relay, assessments). The
//! standalone `vhd-api-rest` binary exists for development; this is the
//! deployment entry point.

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, ChatRelay, router};
use vhd_core::{AssessmentService, CoreConfig};

/// Starts the VHD REST server on the configured address.
///
/// # Environment Variables
/// - `VHD_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `VHD_CHAT_UPSTREAM`: Upstream chat-completion endpoint URL
/// - `VHD_SCORING_PRESET`: Optional path to a YAML scoring preset
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("vhd=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VHD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let upstream = std::env::var("VHD_CHAT_UPSTREAM")
        .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".into());

    let config = match std::env::var("VHD_SCORING_PRESET").ok().map(PathBuf::from) {
        Some(path) => CoreConfig::from_yaml_file(&path)?,
        None => CoreConfig::default(),
    };

    tracing::info!("++ Starting VHD REST on {}", addr);

    let state = AppState::new(AssessmentService::new(config), ChatRelay::new(upstream)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
