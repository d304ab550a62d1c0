//! Local filesystem upload store.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use elderease_core::config::UploadConfig;
use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;

use crate::decode::decode_image;

/// Writes decoded uploads into a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalUploadStore {
    root: PathBuf,
    max_bytes: usize,
}

impl LocalUploadStore {
    /// Create the store, making sure the upload directory exists.
    pub async fn new(config: &UploadConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.directory);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", root.display()),
                e,
            )
        })?;
        info!(directory = %root.display(), max_bytes = config.max_bytes, "Upload store ready");
        Ok(Self {
            root,
            max_bytes: config.max_bytes,
        })
    }

    /// Directory files are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a previously stored file.
    ///
    /// Only bare file names are accepted, so lookups cannot leave the upload
    /// directory.
    pub fn resolve(&self, file_name: &str) -> AppResult<PathBuf> {
        let valid = !file_name.is_empty()
            && !file_name.starts_with('.')
            && file_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
        if !valid {
            return Err(AppError::not_found(format!("Upload not found: {file_name}")));
        }
        Ok(self.root.join(file_name))
    }

    /// Decode `payload` and persist it. Returns the generated file name.
    pub async fn save_base64(&self, payload: &str) -> AppResult<String> {
        let image = decode_image(payload)?;
        if image.bytes.len() > self.max_bytes {
            return Err(AppError::validation(format!(
                "Upload of {} bytes exceeds the {} byte limit",
                image.bytes.len(),
                self.max_bytes
            )));
        }

        let file_name = format!("{}.{}", Uuid::now_v7().simple(), image.extension);
        let path = self.root.join(&file_name);
        fs::write(&path, &image.bytes).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write upload: {file_name}"),
                e,
            )
        })?;

        debug!(file = %file_name, bytes = image.bytes.len(), "Stored upload");
        Ok(file_name)
    }
}
