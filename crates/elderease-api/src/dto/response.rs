//! Response DTOs that are not plain entities.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// `"up"` or `"down"`.
    pub database: String,
    /// Active store backend.
    pub backend: String,
}

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Stored file name, served under `/uploads/<id>`.
    pub id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarkedResponse {
    pub marked: u64,
}
