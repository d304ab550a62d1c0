//! Base64 and data-URL decoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;

use elderease_core::error::{AppError, ErrorKind};
use elderease_core::result::AppResult;

/// Extension used when the payload carries no MIME type.
const DEFAULT_EXTENSION: &str = "png";

/// Raw image bytes plus the file extension to store them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Bytes,
    pub extension: &'static str,
}

/// Decode an upload payload.
///
/// Accepts either bare base64 or `data:image/<type>;base64,<data>`.
/// Embedded whitespace is ignored.
pub fn decode_image(payload: &str) -> AppResult<DecodedImage> {
    let payload = payload.trim();
    let (extension, encoded) = match payload.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or_else(|| AppError::validation("Malformed data URL: missing ','"))?;
            let mime = header.strip_suffix(";base64").ok_or_else(|| {
                AppError::validation("Only base64-encoded data URLs are supported")
            })?;
            (extension_for(mime)?, data)
        }
        None => (DEFAULT_EXTENSION, payload),
    };

    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(AppError::validation("Upload is empty"));
    }
    let bytes = BASE64.decode(compact.as_bytes()).map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "Invalid base64 encoding", e)
    })?;

    Ok(DecodedImage {
        bytes: Bytes::from(bytes),
        extension,
    })
}

fn extension_for(mime: &str) -> AppResult<&'static str> {
    let subtype = mime
        .strip_prefix("image/")
        .ok_or_else(|| AppError::validation(format!("Unsupported upload type '{mime}'")))?;
    Ok(match subtype.to_ascii_lowercase().as_str() {
        "jpeg" | "jpg" => "jpg",
        "gif" => "gif",
        "webp" => "webp",
        "bmp" => "bmp",
        _ => DEFAULT_EXTENSION,
    })
}
