//! Dense occupancy and color grids stored as flat arrays.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGB color. Serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, rounding to the nearest value.
    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Dimensions of a voxel grid along x, y and z. Serialized as `[w, h, d]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 3]", into = "[usize; 3]")]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl GridShape {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height * self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Flattened offset: x-major, then y, then z.
    pub fn offset(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(self.contains(x, y, z), "({x}, {y}, {z}) outside {self}");
        (x * self.height + y) * self.depth + z
    }

    /// Inverse of [`GridShape::offset`].
    pub fn coords(&self, offset: usize) -> [usize; 3] {
        let z = offset % self.depth;
        let xy = offset / self.depth;
        [xy / self.height, xy % self.height, z]
    }
}

impl From<[usize; 3]> for GridShape {
    fn from([width, height, depth]: [usize; 3]) -> Self {
        Self::new(width, height, depth)
    }
}

impl From<GridShape> for [usize; 3] {
    fn from(s: GridShape) -> Self {
        [s.width, s.height, s.depth]
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Dense 3D boolean grid marking solid voxels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    shape: GridShape,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            cells: vec![false; shape.len()],
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.cells[self.shape.offset(x, y, z)]
    }

    /// Mark a cell occupied. Returns `true` if it was empty before.
    pub fn set(&mut self, x: usize, y: usize, z: usize) -> bool {
        let offset = self.shape.offset(x, y, z);
        !std::mem::replace(&mut self.cells[offset], true)
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Occupied cells in the order of [`GridShape::offset`].
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Number of occupied cells in the column at `(x, y)`.
    pub fn column_count(&self, x: usize, y: usize) -> usize {
        let start = self.shape.offset(x, y, 0);
        self.cells[start..start + self.shape.depth]
            .iter()
            .filter(|&&c| c)
            .count()
    }
}

/// Dense 3D color grid aligned with an [`OccupancyGrid`].
///
/// Colors of unoccupied cells are left at `Rgb::default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    shape: GridShape,
    cells: Vec<Rgb>,
}

impl ColorGrid {
    pub fn new(shape: GridShape) -> Self {
        Self {
            shape,
            cells: vec![Rgb::default(); shape.len()],
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Rgb {
        self.cells[self.shape.offset(x, y, z)]
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, color: Rgb) {
        let offset = self.shape.offset(x, y, z);
        self.cells[offset] = color;
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.cells
    }
}

/// Accumulates an occupancy grid, its colors and the occupied count.
#[derive(Debug)]
pub struct VolumeBuilder {
    occupancy: OccupancyGrid,
    colors: ColorGrid,
    count: usize,
}

impl VolumeBuilder {
    pub fn new(shape: GridShape) -> Self {
        Self {
            occupancy: OccupancyGrid::new(shape),
            colors: ColorGrid::new(shape),
            count: 0,
        }
    }

    /// Occupy `(x, y, z)` with `color`. A cell is counted once no matter how
    /// often it is filled; the latest color wins.
    pub fn fill(&mut self, x: usize, y: usize, z: usize, color: Rgb) {
        if self.occupancy.set(x, y, z) {
            self.count += 1;
        }
        self.colors.set(x, y, z, color);
    }

    pub fn into_parts(self) -> (OccupancyGrid, ColorGrid, usize) {
        (self.occupancy, self.colors, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_x_major() {
        let shape = GridShape::new(2, 3, 4);
        assert_eq!(shape.offset(0, 0, 0), 0);
        assert_eq!(shape.offset(0, 0, 1), 1);
        assert_eq!(shape.offset(0, 1, 0), 4);
        assert_eq!(shape.offset(1, 0, 0), 12);
        assert_eq!(shape.offset(1, 2, 3), 23);
    }

    #[test]
    fn test_coords_inverts_offset() {
        let shape = GridShape::new(3, 5, 7);
        for offset in 0..shape.len() {
            let [x, y, z] = shape.coords(offset);
            assert_eq!(shape.offset(x, y, z), offset);
        }
    }

    #[test]
    fn test_builder_counts_each_cell_once() {
        let mut builder = VolumeBuilder::new(GridShape::new(1, 1, 2));
        builder.fill(0, 0, 1, Rgb::new(1, 1, 1));
        builder.fill(0, 0, 1, Rgb::new(2, 2, 2));
        let (occupancy, colors, count) = builder.into_parts();
        assert_eq!(count, 1);
        assert_eq!(occupancy.count(), 1);
        assert_eq!(colors.get(0, 0, 1), Rgb::new(2, 2, 2));
        assert_eq!(colors.get(0, 0, 0), Rgb::default());
    }

    #[test]
    fn test_rgb_scaled_rounds() {
        assert_eq!(Rgb::new(255, 101, 3).scaled(0.5), Rgb::new(128, 51, 2));
    }

    #[test]
    fn test_rgb_serializes_as_array() {
        let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let shape: GridShape = serde_json::from_str("[4,4,8]").unwrap();
        assert_eq!(shape, GridShape::new(4, 4, 8));
    }
}
