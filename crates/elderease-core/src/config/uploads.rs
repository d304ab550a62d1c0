//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded task images are written and served from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory holding uploaded files.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Maximum decoded size of a single upload.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_bytes: default_max_bytes(),
        }
    }
}

fn default_directory() -> String {
    "uploads".to_string()
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}
