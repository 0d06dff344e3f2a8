//! Persistence of sparse volumes.
//!
//! The file extension selects the format:
//! - `.json` - readable document with `method`, `shape`, `positions`, `colors`
//! - `.bin` - compact little-endian layout with a SHA-256 trailer

mod binary;
mod json;

use std::path::{Path, PathBuf};

use crate::encoder::{PayloadError, SparseVolume};
use crate::voxel::Method;

pub use binary::{decode_binary, encode_binary, BINARY_MAGIC, BINARY_VERSION};

/// Errors that can occur when saving or loading volumes.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported output format '{}': use .bin or .json", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Not a voxel file (bad magic)")]
    BadMagic,

    #[error("Unsupported voxel file version {0}")]
    UnsupportedVersion(u8),

    #[error("Voxel file truncated")]
    Truncated,

    #[error("Checksum mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Corrupt voxel payload: {0}")]
    Corrupt(#[from] PayloadError),

    #[error("Unknown method tag '{0}'")]
    UnknownMethod(String),

    #[error("{field} = {value} does not fit the binary format")]
    TooLarge { field: &'static str, value: usize },
}

/// On-disk formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Binary,
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Binary => "bin",
            Format::Json => "json",
        }
    }

    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "bin" => Some(Format::Binary),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Default file name for a method: `<method>_voxels.<ext>`.
pub fn file_name(method: Method, format: Format) -> String {
    format!("{}_voxels.{}", method, format.extension())
}

/// Write `volume` to `path`, creating parent directories as needed.
pub fn save(volume: &SparseVolume, path: &Path) -> Result<PathBuf, SinkError> {
    let format = Format::from_path(path).ok_or_else(|| SinkError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let bytes = match format {
        Format::Binary => encode_binary(volume)?,
        Format::Json => json::encode_json(volume)?,
    };
    std::fs::write(path, bytes)?;

    log::info!(
        "Saved {} {} voxels to {}",
        volume.len(),
        volume.method,
        path.display()
    );
    Ok(path.to_path_buf())
}

/// Read a volume written by [`save`].
pub fn load(path: &Path) -> Result<SparseVolume, SinkError> {
    let format = Format::from_path(path).ok_or_else(|| SinkError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let bytes = std::fs::read(path)?;

    match format {
        Format::Binary => decode_binary(&bytes),
        Format::Json => json::decode_json(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.bin")), Some(Format::Binary));
        assert_eq!(Format::from_path(Path::new("b.JSON")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.npz")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Method::Color, Format::Binary), "color_voxels.bin");
        assert_eq!(file_name(Method::Structure, Format::Json), "structure_voxels.json");
    }
}
