//! Area-averaging resampling to a square grid.

use super::PixelBuffer;
use crate::error::{Result, VoxelError};

/// Overlap weights between one output cell and the source pixels it covers.
fn axis_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);

            (first..last)
                .filter_map(|p| {
                    let overlap = end.min((p + 1) as f64) - start.max(p as f64);
                    (overlap > 1e-12).then_some((p, overlap))
                })
                .collect()
        })
        .collect()
}

/// Resample `image` to `resolution x resolution` by area averaging.
///
/// Each output cell maps to a rectangle in source coordinates and averages
/// every source pixel it overlaps, weighted by the overlapped area. This
/// behaves as a box filter when shrinking and as a smooth interpolation when
/// enlarging. When `resolution` equals both source dimensions the image is
/// returned unchanged.
///
/// # Errors
/// [`VoxelError::InvalidResolution`] when `resolution` is zero.
pub fn resize_area(image: &PixelBuffer, resolution: usize) -> Result<PixelBuffer> {
    if resolution == 0 {
        return Err(VoxelError::InvalidResolution(resolution));
    }

    if image.width() == resolution && image.height() == resolution {
        return Ok(image.clone());
    }

    let x_weights = axis_weights(image.width(), resolution);
    let y_weights = axis_weights(image.height(), resolution);
    let src = image.data();
    let src_width = image.width();

    let mut data = Vec::with_capacity(resolution * resolution * 3);

    for ys in &y_weights {
        for xs in &x_weights {
            let mut sum = [0f64; 3];
            let mut total = 0f64;

            for &(py, wy) in ys {
                for &(px, wx) in xs {
                    let w = wy * wx;
                    let idx = (py * src_width + px) * 3;
                    sum[0] += src[idx] as f64 * w;
                    sum[1] += src[idx + 1] as f64 * w;
                    sum[2] += src[idx + 2] as f64 * w;
                    total += w;
                }
            }

            for channel in sum {
                let value = if total > 0.0 { channel / total } else { 0.0 };
                data.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    PixelBuffer::new(resolution, resolution, data)
}
