//! RGB to grayscale conversion using ITU-R BT.601 luminance formula.

use super::PixelBuffer;
use crate::voxel::Rgb;

/// Luminance of a single color: Y = 0.299*R + 0.587*G + 0.114*B, rounded.
///
/// Coefficients are scaled by 1000 (299 + 587 + 114 = 1000) so the
/// conversion stays in integer math.
pub fn luminance(color: Rgb) -> u8 {
    let r = color.r as u32;
    let g = color.g as u32;
    let b = color.b as u32;
    ((299 * r + 587 * g + 114 * b + 500) / 1000) as u8
}

/// Convert an RGB buffer to grayscale, one value (0-255) per pixel.
pub fn to_grayscale(image: &PixelBuffer) -> Vec<u8> {
    let mut gray = Vec::with_capacity(image.pixel_count());
    gray.extend(image.pixels().map(luminance));
    gray
}
