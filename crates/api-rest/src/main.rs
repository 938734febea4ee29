//! Standalone REST relay server binary.
//!
//! ## Purpose
//! Runs the REST relay server on its own.
//!
//! ## Intended use
//! Useful during development when only the relay routes (with OpenAPI/Swagger UI) are needed.
//! The workspace's main `pdfchat-run` binary serves the same router.

use api_rest::{config_from_env, router, AppState, DEFAULT_REST_ADDR};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the PDF Chat REST relay server
///
/// # Environment Variables
/// - `PDFCHAT_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CHATPDF_API_KEY`: Document-service key (required)
/// - `CHATPDF_BASE_URL`: Document-service base URL (optional)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the document-service configuration is missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("pdfchat_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PDFCHAT_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    let cfg = Arc::new(config_from_env()?);

    tracing::info!("-- Starting PDF Chat REST relay on {}", addr);
    tracing::info!("-- Document service: {}", cfg.base_url());

    let app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
