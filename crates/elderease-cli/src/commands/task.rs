//! Task inspection CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use elderease_core::config::AppConfig;
use elderease_core::error::AppError;
use elderease_core::types::UserId;
use elderease_entity::task::{Task, TaskFilter, TaskStatus};

use crate::output::{self, OutputFormat};

/// Arguments for task commands
#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Task subcommand
    #[command(subcommand)]
    pub command: TaskCommand,
}

/// Task subcommands
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List tasks, newest first
    List {
        /// Filter by status (open, accepted, completed, archived, cancelled)
        #[arg(short, long)]
        status: Option<String>,
        /// Filter by elderly owner id
        #[arg(long)]
        elderly: Option<i64>,
        /// Filter by volunteer id
        #[arg(long)]
        volunteer: Option<i64>,
        /// Only archived (true) or only active (false) tasks
        #[arg(long)]
        archived: Option<bool>,
    },
}

/// Task display row for table output
#[derive(Debug, Serialize, Tabled)]
struct TaskRow {
    id: i64,
    title: String,
    status: String,
    elderly: i64,
    volunteer: String,
    confirmed: bool,
    rating: String,
    created_at: String,
}

impl From<Task> for TaskRow {
    fn from(t: Task) -> Self {
        Self {
            id: t.id.get(),
            title: t.title,
            status: t.status.to_string(),
            elderly: t.elderly_id.get(),
            volunteer: t
                .volunteer_id
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            confirmed: t.elderly_confirmed,
            rating: t
                .rating
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            created_at: t.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute task commands
pub async fn execute(
    args: &TaskArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    match &args.command {
        TaskCommand::List {
            status,
            elderly,
            volunteer,
            archived,
        } => {
            let status = match status.as_deref() {
                Some(raw) => Some(raw.parse::<TaskStatus>()?),
                None => None,
            };
            let filter = TaskFilter {
                elderly_id: elderly.map(UserId::new),
                volunteer_id: volunteer.map(UserId::new),
                status,
                archived: *archived,
            };
            let rows: Vec<TaskRow> = stores
                .tasks
                .list(&filter)
                .await?
                .into_iter()
                .map(TaskRow::from)
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
