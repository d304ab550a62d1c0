//! PostgreSQL implementations of the store traits.

pub mod message;
pub mod notification;
pub mod task;
pub mod user;

pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use task::TaskRepository;
pub use user::UserRepository;
