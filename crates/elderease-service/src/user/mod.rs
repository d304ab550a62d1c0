//! Registration, login and volunteer ratings.

pub mod rating;
pub mod service;

pub use rating::RatingService;
pub use service::UserService;
