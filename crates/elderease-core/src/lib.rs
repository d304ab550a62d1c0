//! # elderease-core
//!
//! Core crate for ElderEase. Contains configuration schemas, typed
//! identifiers and the unified error system.
//!
//! This crate has **no** internal dependencies on other ElderEase crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
