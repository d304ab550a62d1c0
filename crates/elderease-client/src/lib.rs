//! # elderease-client
//!
//! Client-side building blocks for ElderEase front ends:
//!
//! - [`ApiClient`]: typed wrapper over every REST endpoint.
//! - [`SessionManager`]: login, registration and logout on top of an
//!   injected [`SessionStore`].
//! - [`Poller`]: periodic jobs that stop when their handle is dropped.
//! - [`NotificationFeed`] and [`MessageFeed`]: polled snapshots published
//!   through `tokio::sync::watch`.

pub mod api;
pub mod config;
pub mod feed;
pub mod poller;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use feed::{MessageFeed, NotificationFeed, NotificationSnapshot};
pub use poller::{PollHandle, Poller};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionManager, SessionStore};
