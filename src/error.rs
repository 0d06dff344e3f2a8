//! Error types for the voxelization core.

use std::path::PathBuf;

/// Errors raised while sampling an image or running a voxelization strategy.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VoxelError {
    #[error("Image not found: {}", path.display())]
    ImageNotFound { path: PathBuf },

    #[error("Failed to decode image '{}': {message}", path.display())]
    ImageDecode { path: PathBuf, message: String },

    #[error("Invalid image buffer: {width}x{height} with {len} bytes of RGB data")]
    InvalidImage {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("Invalid resolution {0}: must be greater than 0")]
    InvalidResolution(usize),

    #[error("Invalid parameter {name} = {value}: must be greater than 0")]
    InvalidParameter { name: &'static str, value: usize },

    #[error("Unknown method '{0}'. Available methods: height, color, structure, all")]
    UnknownMethod(String),
}

pub type Result<T> = std::result::Result<T, VoxelError>;
