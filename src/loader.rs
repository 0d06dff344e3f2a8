//! Image loading: decodes files into [`PixelBuffer`]s.

use std::path::Path;

use crate::error::{Result, VoxelError};
use crate::sampler::PixelBuffer;

/// Decode the image at `path` into an RGB buffer.
///
/// # Errors
/// - [`VoxelError::ImageNotFound`] if nothing exists at `path`
/// - [`VoxelError::ImageDecode`] if the file is not a supported image
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    if !path.exists() {
        return Err(VoxelError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }

    let decoded = image::open(path).map_err(|e| VoxelError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    log::debug!("Decoded {}: {} x {}", path.display(), width, height);

    PixelBuffer::new(width as usize, height as usize, rgb.into_raw())
}
