//! # elderease-entity
//!
//! Domain entity models for ElderEase. Every struct in this crate
//! represents a database table row or a domain value object. Row types
//! derive `sqlx::FromRow` and serialize with camelCase field names, which
//! is what the web client speaks.

pub mod message;
pub mod notification;
pub mod task;
pub mod user;
