//! Structure-depth strategy: distance from edges extruded as depth.

use super::grid::{Rgb, VolumeBuilder};
use crate::sampler::{detect_edges, distance_to_edges, to_grayscale, PixelBuffer};

/// Normalize a distance field into depth levels `0..depth_levels`.
///
/// With `max_dist > 0` each pixel gets `floor(dist / max_dist * (D - 1))`.
/// A field whose maximum is 0 (no edges, flat image) maps to all zeros.
pub fn depth_map(distances: &[f32], depth_levels: usize) -> Vec<usize> {
    let max_dist = distances.iter().copied().fold(0f32, f32::max);
    if max_dist <= 0.0 {
        return vec![0; distances.len()];
    }

    let top = depth_levels.saturating_sub(1);
    distances
        .iter()
        .map(|&d| ((d / max_dist * top as f32).floor() as usize).min(top))
        .collect()
}

/// Base color darkened with depth: `1 - (z / D) * 0.5`.
pub fn shade(color: Rgb, z: usize, depth_levels: usize) -> Rgb {
    let intensity = 1.0 - (z as f32 / depth_levels.max(1) as f32) * 0.5;
    color.scaled(intensity)
}

/// Fill `z` in `[0, depth]` (inclusive) for every pixel.
///
/// Every column receives at least the voxel at `z = 0`.
pub(crate) fn voxelize(sample: &PixelBuffer, depth_levels: usize, builder: &mut VolumeBuilder) {
    let (w, h) = (sample.width(), sample.height());
    let gray = to_grayscale(sample);
    let edges = detect_edges(&gray, w, h);
    let depths = depth_map(&distance_to_edges(&edges, w, h), depth_levels);

    log::debug!(
        "structure: {} edge pixels, deepest column {}",
        edges.iter().filter(|&&e| e != 0).count(),
        depths.iter().max().copied().unwrap_or(0)
    );

    for y in 0..h {
        for x in 0..w {
            let color = sample.pixel(x, y);
            for z in 0..=depths[y * w + x] {
                builder.fill(x, y, z, shade(color, z, depth_levels));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_map_flat_field() {
        assert_eq!(depth_map(&[0.0; 4], 24), vec![0; 4]);
    }

    #[test]
    fn test_depth_map_normalizes() {
        let d = depth_map(&[0.0, 1.0, 2.0, 4.0], 5);
        assert_eq!(d, vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_depth_map_single_level() {
        assert_eq!(depth_map(&[0.0, 3.0], 1), vec![0, 0]);
    }

    #[test]
    fn test_shade() {
        let c = Rgb::new(200, 100, 50);
        assert_eq!(shade(c, 0, 24), c);
        // z = 12 of 24 -> intensity 0.75
        assert_eq!(shade(c, 12, 24), Rgb::new(150, 75, 38));
    }
}
