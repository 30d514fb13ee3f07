//! Error types for asset loading.

use thiserror::Error;

/// Errors that can occur while turning asset bytes into a `RasterImage`.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("RGBA buffer has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Image has zero width or height")]
    EmptyImage,
}
