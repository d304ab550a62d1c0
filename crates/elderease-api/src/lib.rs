//! # elderease-api
//!
//! HTTP API layer for ElderEase built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging,
//! compression), extractors, DTOs, and the mapping from [`AppError`] kinds
//! to HTTP status codes.
//!
//! [`AppError`]: elderease_core::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
