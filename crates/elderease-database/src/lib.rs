//! # elderease-database
//!
//! Persistence for ElderEase. The service layer talks to the store traits
//! in [`store`]; two backends implement them:
//!
//! - [`repositories`]: PostgreSQL via sqlx.
//! - [`memory`]: `DashMap`-backed stores for tests and local development.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod seed;
pub mod store;

pub use connection::DatabasePool;
pub use store::{MessageStore, NotificationStore, Stores, TaskStore, UserStore};
