//! Start the ElderEase server.

use clap::Args;

use elderease_core::config::AppConfig;
use elderease_core::error::AppError;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.no_migrate {
        config.database.run_migrations = false;
    }

    println!("Starting ElderEase server...");
    output::print_kv("Host", &config.server.host);
    output::print_kv("Port", &config.server.port.to_string());
    output::print_kv("Backend", &config.database.backend.to_string());

    elderease_api::run_server(config).await
}
