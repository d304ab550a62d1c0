//! HTTP request handlers grouped by resource.

pub mod auth;
pub mod health;
pub mod message;
pub mod notification;
pub mod task;
pub mod upload;
pub mod user;
