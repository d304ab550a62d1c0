//! Notification fan-out and read-state management.

pub mod dispatcher;
pub mod service;

pub use dispatcher::NotificationDispatcher;
pub use service::NotificationService;
