//! Voxelization strategies and the grids they produce.
//!
//! Every strategy reads an `R x R` resample of the source image and fills a
//! fresh `(R, R, depth)` occupancy grid plus an aligned color grid:
//!
//! - [`Strategy::Height`] - grayscale brightness becomes column height,
//!   `z` in `[0, height)`
//! - [`Strategy::HueLayer`] - hue picks a single layer, gated on saturation
//!   and value
//! - [`Strategy::StructureDepth`] - distance from edges becomes depth,
//!   `z` in `[0, depth]`, darkened with `z`

mod grid;
mod height;
mod hue;
mod strategy;
mod structure;

pub use grid::{ColorGrid, GridShape, OccupancyGrid, Rgb, VolumeBuilder};
pub use height::column_height;
pub use hue::{hue_layer, passes_gate, SATURATION_GATE, VALUE_GATE};
pub use strategy::{
    HeightParams, HueLayerParams, Method, MethodSelector, Strategy, StrategyResult, StructureParams,
};
pub use structure::{depth_map, shade};
