//! ElderEase Server: connects elderly users with volunteers.
//!
//! Main entry point that loads configuration, sets up logging and runs the
//! HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use elderease_core::config::{AppConfig, LogFormat};
use elderease_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ELDEREASE_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.database.backend,
        "Starting ElderEase"
    );
    elderease_api::run_server(config).await?;
    tracing::info!("ElderEase shut down gracefully");
    Ok(())
}
