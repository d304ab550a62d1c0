//! Volunteer rating value and aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;

use elderease_core::AppError;

/// A single rating, guaranteed to be within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: i32 = 1;
    /// Highest accepted rating.
    pub const MAX: i32 = 5;

    /// Validate a raw rating.
    pub fn new(value: i32) -> Result<Self, AppError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AppError::validation(format!(
                "Rating must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// The raw value.
    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> i32 {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arithmetic mean of a rating history, `None` when there are no ratings.
pub fn average(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    Some(sum as f64 / ratings.len() as f64)
}
