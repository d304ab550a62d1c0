//! Per-task conversations.

pub mod service;

pub use service::MessageService;
