//! RGB to hue-saturation-value conversion with half-scale hue.

use super::PixelBuffer;
use crate::voxel::Rgb;

/// Exclusive upper bound of the half-scale hue range.
pub const HUE_RANGE: u8 = 180;

/// A pixel in HSV space.
///
/// Hue is stored on the half-scale convention (degrees / 2) so it fits a
/// byte: `0..180`. Saturation and value use the full `0..=255` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl From<Rgb> for Hsv {
    fn from(color: Rgb) -> Self {
        let r = color.r as f32;
        let g = color.g as f32;
        let b = color.b as f32;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = max - min;

        let s = if max > 0.0 { 255.0 * diff / max } else { 0.0 };

        let mut h = if diff == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / diff
        } else if max == g {
            120.0 + 60.0 * (b - r) / diff
        } else {
            240.0 + 60.0 * (r - g) / diff
        };
        if h < 0.0 {
            h += 360.0;
        }

        // Hue is circular: 359.x degrees rounds up to 180 and wraps to red.
        let h = (h / 2.0).round() as u32 % HUE_RANGE as u32;

        Hsv {
            h: h as u8,
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// Convert an RGB buffer to HSV, one entry per pixel in row-major order.
pub fn to_hsv(image: &PixelBuffer) -> Vec<Hsv> {
    image.pixels().map(Hsv::from).collect()
}
