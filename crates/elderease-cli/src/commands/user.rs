//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use elderease_core::config::AppConfig;
use elderease_core::error::AppError;
use elderease_entity::user::{User, UserFilter, UserType};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List registered users
    List {
        /// Filter by role (elderly, volunteer)
        #[arg(short = 't', long = "type")]
        user_type: Option<String>,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: i64,
    username: String,
    #[tabled(rename = "type")]
    user_type: String,
    name: String,
    phone: String,
    rating: String,
    created_at: String,
}

impl From<User> for UserRow {
    fn from(u: User) -> Self {
        Self {
            id: u.id.get(),
            name: u.full_name(),
            username: u.username,
            user_type: u.user_type.to_string(),
            phone: u.phone_number,
            rating: u
                .average_rating
                .map(|r| format!("{r:.2} ({})", u.ratings.len()))
                .unwrap_or_else(|| "-".to_string()),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    match &args.command {
        UserCommand::List { user_type } => {
            let user_type = match user_type.as_deref() {
                Some(raw) => Some(raw.parse::<UserType>()?),
                None => None,
            };
            let filter = UserFilter {
                user_type,
                ..Default::default()
            };
            let rows: Vec<UserRow> = stores
                .users
                .list(&filter)
                .await?
                .into_iter()
                .map(UserRow::from)
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
