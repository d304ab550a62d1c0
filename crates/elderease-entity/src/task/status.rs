//! Task lifecycle status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a help request.
///
/// `Open → Accepted → Completed → Archived`, with `Accepted → Open` as a
/// reset and `Cancelled` reachable from `Open` or `Accepted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Waiting for a volunteer.
    Open,
    /// A volunteer has taken the task.
    Accepted,
    /// The volunteer marked the task done; awaiting elderly confirmation.
    Completed,
    /// Confirmed and filed away.
    Archived,
    /// Withdrawn by either party.
    Cancelled,
}

impl TaskStatus {
    /// Return the status as it appears on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Accepted => "Accepted",
            Self::Completed => "Completed",
            Self::Archived => "Archived",
            Self::Cancelled => "Cancelled",
        }
    }

    /// No further transitions leave this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Archived | Self::Cancelled)
    }

    /// Whether either party may still cancel from this state.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Open | Self::Accepted)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = elderease_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "accepted" => Ok(Self::Accepted),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(elderease_core::AppError::validation(format!(
                "Invalid task status: '{s}'. Expected one of: Open, Accepted, Completed, Archived, Cancelled"
            ))),
        }
    }
}
