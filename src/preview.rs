//! Terminal preview of sparse volumes.
//!
//! Large volumes are randomly thinned to a display budget, then projected
//! down the z axis: each (x, y) cell shows its highest voxel as a character
//! from a density ramp, optionally tinted with that voxel's color.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Write;

use crate::encoder::SparseVolume;

/// Default maximum number of voxels to display.
pub const DEFAULT_MAX_VOXELS: usize = 8000;

/// Density ramp from empty to tallest (10 levels).
pub const DEPTH_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Pick which voxels to display.
///
/// When the volume holds more than `budget` voxels, `budget` of them are
/// drawn uniformly at random without replacement. A `seed` makes the draw
/// reproducible. Indices are returned in ascending order.
pub fn subsample(volume: &SparseVolume, budget: usize, seed: Option<u64>) -> Vec<usize> {
    let len = volume.len();
    if len <= budget {
        return (0..len).collect();
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut indices = rand::seq::index::sample(&mut rng, len, budget).into_vec();
    indices.sort_unstable();

    log::debug!("Subsampled {} of {} voxels for display", budget, len);
    indices
}

/// Character for a column whose top voxel is at `z` in a grid of `depth`.
fn ramp_char(z: u32, depth: usize) -> char {
    let levels = DEPTH_RAMP.len() - 1;
    // z = 0 still gets the first visible level
    let level = 1 + (z as usize * (levels - 1)) / depth.saturating_sub(1).max(1);
    DEPTH_RAMP[level.min(levels)]
}

/// Render the selected voxels as a top-down projection.
///
/// Rows are y, columns are x. With `colored`, each cell is wrapped in a
/// 24-bit ANSI foreground color of its top voxel.
pub fn render_top_down(volume: &SparseVolume, indices: &[usize], colored: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "3D Voxels - {} method ({} shown of {}, grid {})",
        volume.method,
        indices.len(),
        volume.len(),
        volume.shape
    );

    if indices.is_empty() {
        out.push_str("No voxels to display\n");
        return out;
    }

    let (w, h) = (volume.shape.width, volume.shape.height);
    let mut top: Vec<Option<usize>> = vec![None; w * h];
    for &i in indices {
        let [x, y, z] = volume.positions[i];
        let cell = &mut top[y as usize * w + x as usize];
        if cell.map_or(true, |j| volume.positions[j][2] < z) {
            *cell = Some(i);
        }
    }

    for row in top.chunks(w) {
        for cell in row {
            match cell {
                None => out.push(' '),
                Some(i) => {
                    let ch = ramp_char(volume.positions[*i][2], volume.shape.depth);
                    if colored {
                        let c = volume.colors[*i];
                        let _ = write!(out, "\x1b[38;2;{};{};{}m{}\x1b[0m", c.r, c.g, c.b, ch);
                    } else {
                        out.push(ch);
                    }
                }
            }
        }
        out.push('\n');
    }

    out
}
