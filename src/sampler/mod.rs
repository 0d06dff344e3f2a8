//! Image sampler: resampling and derived channels for the voxel strategies.
//!
//! The strategies consume a square resample of the source image plus one of
//! the derived channels below:
//!
//! 1. **Resampling** - area averaging to `R x R`
//! 2. **Grayscale** - RGB to luminance using BT.601
//! 3. **HSV** - half-scale hue, saturation, value
//! 4. **Edges** - Canny-style binary edge map (thresholds 50 / 150)
//! 5. **Distance field** - Euclidean distance to the nearest edge pixel

mod buffer;
mod distance;
mod edges;
mod grayscale;
mod hsv;
mod resize;

pub use buffer::PixelBuffer;
pub use distance::distance_to_edges;
pub use edges::{detect_edges, CANNY_HIGH_THRESHOLD, CANNY_LOW_THRESHOLD, EDGE};
pub use grayscale::{luminance, to_grayscale};
pub use hsv::{to_hsv, Hsv, HUE_RANGE};
pub use resize::resize_area;
