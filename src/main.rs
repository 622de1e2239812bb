use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ServerSettings;

/// Main entry point for the studio album service
///
/// Serves the album REST API, and optionally the media root itself, until interrupted.
///
/// # Environment Variables
/// - `STUDIO_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `MEDIA_ROOT`: Directory holding the album images (default: "media")
/// - `MEDIA_URL`: URL prefix the media root is exposed under (default: "/media/")
/// - `STUDIO_SERVE_MEDIA`: Serve the media root statically (default: true)
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studio=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::from_env(&std::env::current_dir()?)?;

    tracing::info!("++ Media root {}", settings.cfg.media_root().display());
    if !settings.cfg.media_root().is_dir() {
        tracing::warn!("media root does not exist yet; album listing will be empty");
    }
    tracing::info!("++ Starting studio REST on {}", settings.addr);

    let app = api_rest::app(&settings);
    let listener = tokio::net::TcpListener::bind(&settings.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Studio REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
