//! Hue-layer strategy: one voxel per saturated pixel, stacked by hue.

use super::grid::VolumeBuilder;
use crate::sampler::{to_hsv, Hsv, PixelBuffer, HUE_RANGE};

/// Pixels must exceed this saturation to be voxelized.
pub const SATURATION_GATE: u8 = 30;

/// Pixels must exceed this value (brightness) to be voxelized.
pub const VALUE_GATE: u8 = 30;

/// Layer index for a half-scale hue: `floor(hue / 180 * layers)`, capped at
/// the top layer.
pub fn hue_layer(hue: u8, layers: usize) -> usize {
    (hue as usize * layers / HUE_RANGE as usize).min(layers.saturating_sub(1))
}

/// Whether a pixel is colorful enough to place a voxel.
pub fn passes_gate(hsv: Hsv) -> bool {
    hsv.s > SATURATION_GATE && hsv.v > VALUE_GATE
}

pub(crate) fn voxelize(sample: &PixelBuffer, layers: usize, builder: &mut VolumeBuilder) {
    let hsv = to_hsv(sample);

    for y in 0..sample.height() {
        for x in 0..sample.width() {
            let px = hsv[y * sample.width() + x];
            if passes_gate(px) {
                builder.fill(x, y, hue_layer(px.h, layers), sample.pixel(x, y));
            }
        }
    }
}
