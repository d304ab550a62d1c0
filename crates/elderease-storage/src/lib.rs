//! # elderease-storage
//!
//! Task image uploads. Clients send images as base64 (raw or as a
//! `data:image/...;base64,` URL); this crate decodes them and writes them to
//! the local upload directory, which the API serves statically.

pub mod decode;
pub mod local;

pub use decode::{DecodedImage, decode_image};
pub use local::LocalUploadStore;
