//! Task conversation messages.

pub mod model;

pub use model::{Message, NewMessage};
