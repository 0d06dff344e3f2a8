//! Height strategy: brightness extruded as column height.

use super::grid::VolumeBuilder;
use crate::sampler::{to_grayscale, PixelBuffer};

/// Column height for a gray value: `floor(gray / 255 * max_height)`.
pub fn column_height(gray: u8, max_height: usize) -> usize {
    (gray as usize * max_height / 255).min(max_height)
}

/// Fill `z` in `[0, height)` for every pixel, colored with the pixel color.
///
/// A black pixel has height 0 and leaves its column empty.
pub(crate) fn voxelize(sample: &PixelBuffer, max_height: usize, builder: &mut VolumeBuilder) {
    let gray = to_grayscale(sample);

    for y in 0..sample.height() {
        for x in 0..sample.width() {
            let height = column_height(gray[y * sample.width() + x], max_height);
            let color = sample.pixel(x, y);
            for z in 0..height {
                builder.fill(x, y, z, color);
            }
        }
    }
}
