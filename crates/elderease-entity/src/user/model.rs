//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use elderease_core::types::UserId;

use super::rating::{self, Rating};
use super::user_type::UserType;

/// A registered ElderEase user, either elderly or volunteer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Plaintext password. Never serialized into responses.
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Role of the user.
    pub user_type: UserType,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique phone number.
    pub phone_number: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Spoken languages.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Means of transport (volunteers only).
    #[serde(default)]
    pub transportation: Vec<String>,
    /// Every rating received, in order.
    #[serde(default)]
    pub ratings: Vec<i32>,
    /// Mean of `ratings`; `None` until the first rating.
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Last", used in notification text and message snapshots.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Check if this user is a volunteer.
    pub fn is_volunteer(&self) -> bool {
        self.user_type == UserType::Volunteer
    }

    /// Check if this user is elderly.
    pub fn is_elderly(&self) -> bool {
        self.user_type == UserType::Elderly
    }

    /// Append a rating and recompute the average.
    pub fn record_rating(&mut self, rating: Rating) {
        self.ratings.push(rating.value());
        self.average_rating = rating::average(&self.ratings);
        self.updated_at = Utc::now();
    }
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
    /// Role.
    pub user_type: UserType,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Spoken languages.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Means of transport (ignored for elderly users).
    #[serde(default)]
    pub transportation: Vec<String>,
}

impl NewUser {
    /// Drop fields that do not apply to the user's role and trim identifiers.
    pub fn normalized(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.phone_number = self.phone_number.trim().to_string();
        if self.user_type == UserType::Elderly {
            self.transportation.clear();
        }
        self
    }
}

/// Optional equality filters for listing users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    /// Exact username.
    pub username: Option<String>,
    /// Exact phone number.
    pub phone_number: Option<String>,
    /// Role.
    pub user_type: Option<UserType>,
}

impl UserFilter {
    /// Check whether a user satisfies every set criterion.
    pub fn matches(&self, user: &User) -> bool {
        self.username.as_ref().is_none_or(|u| *u == user.username)
            && self
                .phone_number
                .as_ref()
                .is_none_or(|p| *p == user.phone_number)
            && self.user_type.is_none_or(|t| t == user.user_type)
    }
}
