//! Task domain entities.

pub mod model;
pub mod status;

pub use model::{NewTask, Task, TaskEdit, TaskFilter};
pub use status::TaskStatus;
