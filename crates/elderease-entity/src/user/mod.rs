//! User domain entities.

pub mod model;
pub mod rating;
pub mod user_type;

pub use model::{NewUser, User, UserFilter};
pub use rating::Rating;
pub use user_type::UserType;
