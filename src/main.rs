use api_rest::{config_from_env, router, AppState, DEFAULT_REST_ADDR};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the PDF Chat application
///
/// Serves the upload and chat relays, the health check and the Swagger UI on one REST server,
/// and shuts down cleanly on Ctrl-C.
///
/// # Environment Variables
/// - `PDFCHAT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CHATPDF_API_KEY`: key sent to the document service in the `x-api-key` header (required)
/// - `CHATPDF_BASE_URL`: document service base URL (default: "https://api.chatpdf.com/v1")
///
/// # Returns
/// * `Ok(())` - If the server starts, runs and shuts down successfully
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pdfchat_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("pdfchat_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("PDFCHAT_REST_ADDR")
        .unwrap_or_else(|_| DEFAULT_REST_ADDR.into())
        .parse()?;
    let cfg = Arc::new(config_from_env()?);

    tracing::info!("++ Starting PDF Chat REST on {}", rest_addr);
    tracing::info!("++ Relaying to {}", cfg.base_url());

    let rest_app = router(AppState::new(cfg));
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, rest_app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("++ PDF Chat REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {:?}", e);
        std::future::pending::<()>().await;
    }
}
