//! In-app notifications.

pub mod event;
pub mod model;

pub use event::{CompletionAudience, NotificationEvent};
pub use model::{NewNotification, Notification};
