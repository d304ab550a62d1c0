//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two roles a registered user can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Creates help requests and confirms/rates their completion.
    Elderly,
    /// Accepts and completes help requests.
    Volunteer,
}

impl UserType {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Elderly => "elderly",
            Self::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = elderease_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elderly" => Ok(Self::Elderly),
            "volunteer" => Ok(Self::Volunteer),
            _ => Err(elderease_core::AppError::validation(format!(
                "Invalid user type: '{s}'. Expected one of: elderly, volunteer"
            ))),
        }
    }
}
