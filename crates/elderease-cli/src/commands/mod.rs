//! CLI command definitions and dispatch.

pub mod migrate;
pub mod seed;
pub mod serve;
pub mod task;
pub mod user;

use clap::{Parser, Subcommand};

use elderease_core::config::AppConfig;
use elderease_core::error::AppError;
use elderease_database::{DatabasePool, Stores};

use crate::output::OutputFormat;

/// ElderEase: connecting elderly people with volunteers
#[derive(Debug, Parser)]
#[command(name = "elderease", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and the environment overlays
    #[arg(long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to apply (config/<env>.toml)
    #[arg(short, long, env = "ELDEREASE_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the ElderEase server
    Serve(serve::ServeArgs),
    /// Apply pending database migrations
    Migrate,
    /// Import a JSON dump into PostgreSQL
    Seed(seed::SeedArgs),
    /// User management
    Users(user::UserArgs),
    /// Task inspection
    Tasks(task::TaskArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Seed(args) => seed::execute(args, &config).await,
            Commands::Users(args) => user::execute(args, &config, self.format).await,
            Commands::Tasks(args) => task::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        AppConfig::load_from_dir(&self.config_dir, &self.env)
    }
}

/// Helper: connect the configured stores without running migrations
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let mut database = config.database.clone();
    database.run_migrations = false;
    Stores::connect(&database).await
}

/// Helper: PostgreSQL pool, refusing the memory backend
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    match open_stores(config).await?.pool() {
        Some(pool) => Ok(pool.clone()),
        None => Err(AppError::configuration(
            "This command needs the postgres backend (database.backend = \"postgres\")",
        )),
    }
}
