//! Task creation, listing and lifecycle transitions.

pub mod lifecycle;
pub mod service;
pub mod update;

pub use lifecycle::{Effect, TaskCommand, Transition};
pub use service::TaskService;
pub use update::TaskUpdate;
