//! Sparse encoding of voxel grids.
//!
//! Converts a dense [`StrategyResult`] into a [`SparseVolume`]: the occupied
//! coordinates in ascending flattened order (x-major, then y, then z), the
//! matching colors, the grid shape and the method tag.

use serde::{Deserialize, Serialize};

use crate::voxel::{ColorGrid, GridShape, Method, OccupancyGrid, Rgb, StrategyResult};

/// Ways a sparse payload can violate its invariants.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{positions} positions but {colors} colors")]
    LengthMismatch { positions: usize, colors: usize },

    #[error("position {position:?} outside grid {shape}")]
    OutOfBounds { position: [u32; 3], shape: GridShape },

    #[error("position {position:?} at index {index} is not after its predecessor")]
    NotAscending { position: [u32; 3], index: usize },
}

/// Occupied voxels of one strategy result, without the empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseVolume {
    pub method: Method,
    pub shape: GridShape,
    pub positions: Vec<[u32; 3]>,
    pub colors: Vec<Rgb>,
}

/// Encode a strategy result.
///
/// Output lists are exactly `result.count()` long and ordered by ascending
/// flattened offset, so encoding identical input always yields identical
/// output.
pub fn encode(result: &StrategyResult) -> SparseVolume {
    let shape = result.shape();
    let colors = result.colors().as_slice();

    let mut volume = SparseVolume {
        method: result.method(),
        shape,
        positions: Vec::with_capacity(result.count()),
        colors: Vec::with_capacity(result.count()),
    };

    let occupied = result
        .occupancy()
        .as_slice()
        .iter()
        .enumerate()
        .filter_map(|(offset, &set)| set.then_some(offset));

    for offset in occupied {
        let [x, y, z] = shape.coords(offset);
        volume.positions.push([x as u32, y as u32, z as u32]);
        volume.colors.push(colors[offset]);
    }

    volume
}

impl SparseVolume {
    /// Number of occupied voxels.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(position, color)` pairs.
    pub fn voxels(&self) -> impl Iterator<Item = ([u32; 3], Rgb)> + '_ {
        self.positions.iter().copied().zip(self.colors.iter().copied())
    }

    /// Check list lengths, bounds and strictly ascending order.
    pub fn validate(&self) -> Result<(), PayloadError> {
        if self.positions.len() != self.colors.len() {
            return Err(PayloadError::LengthMismatch {
                positions: self.positions.len(),
                colors: self.colors.len(),
            });
        }

        // For in-bounds coordinates, lexicographic [x, y, z] order is the
        // flattened offset order, and comparing arrays cannot overflow.
        let mut previous: Option<[u32; 3]> = None;
        for (index, &position) in self.positions.iter().enumerate() {
            let [x, y, z] = position.map(|c| c as usize);
            if !self.shape.contains(x, y, z) {
                return Err(PayloadError::OutOfBounds {
                    position,
                    shape: self.shape,
                });
            }
            if previous.is_some_and(|p| position <= p) {
                return Err(PayloadError::NotAscending { position, index });
            }
            previous = Some(position);
        }

        Ok(())
    }

    /// Rebuild dense grids: listed coordinates occupied, everything else empty.
    pub fn to_dense(&self) -> Result<(OccupancyGrid, ColorGrid), PayloadError> {
        self.validate()?;

        let mut occupancy = OccupancyGrid::new(self.shape);
        let mut colors = ColorGrid::new(self.shape);
        for ([x, y, z], color) in self.voxels() {
            let (x, y, z) = (x as usize, y as usize, z as usize);
            occupancy.set(x, y, z);
            colors.set(x, y, z, color);
        }

        Ok((occupancy, colors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(positions: Vec<[u32; 3]>) -> SparseVolume {
        SparseVolume {
            method: Method::Height,
            shape: GridShape::new(2, 2, 2),
            colors: vec![Rgb::default(); positions.len()],
            positions,
        }
    }

    #[test]
    fn test_validate_accepts_ascending() {
        assert!(volume(vec![[0, 0, 1], [0, 1, 0], [1, 0, 0]]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let err = volume(vec![[0, 1, 0], [0, 1, 0]]).validate().unwrap_err();
        assert_eq!(
            err,
            PayloadError::NotAscending {
                position: [0, 1, 0],
                index: 1
            }
        );
    }

    #[test]
    fn test_validate_huge_shape_does_not_overflow() {
        let max = u32::MAX as usize;
        let mut v = volume(vec![[0, 0, 0], [u32::MAX - 1; 3]]);
        v.shape = GridShape::new(max, max, max);
        assert!(v.validate().is_ok());

        v.positions.swap(0, 1);
        assert_eq!(
            v.validate().unwrap_err(),
            PayloadError::NotAscending {
                position: [0, 0, 0],
                index: 1
            }
        );
    }

    #[test]
    fn test_validate_rejects_out_of_bounds() {
        assert!(matches!(
            volume(vec![[0, 0, 2]]).validate(),
            Err(PayloadError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let mut v = volume(vec![[0, 0, 0]]);
        v.colors.clear();
        assert_eq!(
            v.validate().unwrap_err(),
            PayloadError::LengthMismatch {
                positions: 1,
                colors: 0
            }
        );
    }
}
