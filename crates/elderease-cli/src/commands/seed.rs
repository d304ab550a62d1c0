//! Import a JSON dump (`{users, tasks, messages, notifications}`).

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use elderease_core::config::AppConfig;
use elderease_core::error::AppError;
use elderease_database::seed::{self, SeedData};

use crate::output;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Path to the JSON dump
    #[arg(short, long, default_value = "db.json")]
    pub file: PathBuf,
}

/// Execute the seed command
pub async fn execute(args: &SeedArgs, config: &AppConfig) -> Result<(), AppError> {
    let data = SeedData::from_path(&args.file).await?;
    let pool = super::create_db_pool(config).await?;

    println!("Applying migrations before import...");
    elderease_database::migration::run_migrations(pool.pool()).await?;

    let report = seed::seed(pool.pool(), &data).await?;
    info!(
        file = %args.file.display(),
        users = report.users,
        tasks = report.tasks,
        messages = report.messages,
        notifications = report.notifications,
        "Seed import finished"
    );
    output::print_success(&format!("Imported {}", args.file.display()));
    output::print_kv("Users", &report.users.to_string());
    output::print_kv("Tasks", &report.tasks.to_string());
    output::print_kv("Messages", &report.messages.to_string());
    output::print_kv("Notifications", &report.notifications.to_string());

    pool.close().await;
    Ok(())
}
