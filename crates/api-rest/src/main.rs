//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when iterating on the HTTP layer. The workspace's main `studio-run`
//! binary serves the same router.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::ServerSettings;

/// Main entry point for the studio REST API server
///
/// # Environment Variables
/// - `STUDIO_REST_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `MEDIA_ROOT`: Media root directory (default: "media" under the working directory)
/// - `MEDIA_URL`: Media URL prefix (default: "/media/")
/// - `STUDIO_SERVE_MEDIA`: Serve the media root statically (default: true)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("studio_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = ServerSettings::from_env(&std::env::current_dir()?)?;
    if !settings.cfg.media_root().is_dir() {
        tracing::warn!(
            "media root {} does not exist yet; album listing will be empty",
            settings.cfg.media_root().display()
        );
    }

    tracing::info!("-- Starting studio REST API on {}", settings.addr);

    let app = api_rest::app(&settings);

    let listener = tokio::net::TcpListener::bind(&settings.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
