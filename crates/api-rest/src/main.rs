//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the VHD REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST surface
//! (with OpenAPI/Swagger UI). The workspace's main `vhd-run` binary is the
//! deployment entry point.

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, ChatRelay, router};
use vhd_core::{AssessmentService, CoreConfig};

/// Main entry point for the VHD REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000).
///
/// # Environment Variables
/// - `VHD_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `VHD_CHAT_UPSTREAM`: Upstream chat-completion endpoint URL
/// - `VHD_SCORING_PRESET`: Optional path to a YAML scoring preset
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the scoring preset cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VHD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let upstream = std::env::var("VHD_CHAT_UPSTREAM")
        .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".into());

    let config = match std::env::var("VHD_SCORING_PRESET").ok().map(PathBuf::from) {
        Some(path) => CoreConfig::from_yaml_file(&path)?,
        None => CoreConfig::default(),
    };

    tracing::info!("-- Starting VHD REST API on {}", addr);
    tracing::info!("-- Chat relay upstream: {}", upstream);

    let state = AppState::new(AssessmentService::new(config), ChatRelay::new(upstream)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
