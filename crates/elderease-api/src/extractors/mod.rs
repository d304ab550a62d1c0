//! Custom Axum extractors.
//!
//! Each wraps the stock axum extractor and maps its rejection into
//! [`ApiError`](crate::error::ApiError) so every 4xx carries `{error, code}`.

pub mod json;
pub mod path;
pub mod query;

pub use json::ValidatedJson;
pub use path::ValidatedPath;
pub use query::ValidatedQuery;
