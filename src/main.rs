use claims_reconciler::config::{Config, SourceMode};
use claims_reconciler::handlers::{self, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - The claim source (live backend or fixtures).
/// - HTTP routes and middleware.
///
/// It then starts the Axum server.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Ok if the server runs successfully, or an error if initialization fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "claims_reconciler=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let feed = claims_reconciler::build_feed(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize claim source: {}", e))?;
    match config.source_mode {
        SourceMode::Live => {
            tracing::info!("✓ Claims backend client initialized: {}", config.api_url)
        }
        SourceMode::Fixture => tracing::info!(
            "✓ Serving fixture claims ({} ms delay)",
            config.fixture_delay.as_millis()
        ),
    }

    let app_state = Arc::new(AppState { feed });

    let app = handlers::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
