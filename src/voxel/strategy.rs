//! Strategy selection, parameters and results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::grid::{ColorGrid, GridShape, OccupancyGrid, VolumeBuilder};
use super::{height, hue, structure};
use crate::error::{Result, VoxelError};
use crate::sampler::{resize_area, PixelBuffer};

/// Identifies one of the three voxelization strategies.
///
/// Ordering follows the fixed run order used for "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Brightness extruded as column height
    Height,
    /// Hue mapped to a single layer
    Color,
    /// Distance from edges extruded as depth
    Structure,
}

impl Method {
    pub const ALL: [Method; 3] = [Method::Height, Method::Color, Method::Structure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Height => "height",
            Method::Color => "color",
            Method::Structure => "structure",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = VoxelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "height" => Ok(Method::Height),
            "color" | "hue" => Ok(Method::Color),
            "structure" => Ok(Method::Structure),
            _ => Err(VoxelError::UnknownMethod(s.to_string())),
        }
    }
}

/// Which strategies a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSelector {
    Single(Method),
    All,
}

impl MethodSelector {
    /// Methods to run, in the fixed order height -> color -> structure.
    pub fn methods(&self) -> Vec<Method> {
        match self {
            MethodSelector::Single(m) => vec![*m],
            MethodSelector::All => Method::ALL.to_vec(),
        }
    }
}

impl FromStr for MethodSelector {
    type Err = VoxelError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(MethodSelector::All)
        } else {
            s.parse().map(MethodSelector::Single)
        }
    }
}

impl From<Method> for MethodSelector {
    fn from(m: Method) -> Self {
        MethodSelector::Single(m)
    }
}

/// Parameters of the height strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeightParams {
    pub resolution: usize,
    pub max_height: usize,
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            resolution: 64,
            max_height: 32,
        }
    }
}

/// Parameters of the hue-layer strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueLayerParams {
    pub resolution: usize,
    pub layers: usize,
}

impl Default for HueLayerParams {
    fn default() -> Self {
        Self {
            resolution: 48,
            layers: 16,
        }
    }
}

/// Parameters of the structure-depth strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureParams {
    pub resolution: usize,
    pub depth_levels: usize,
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            resolution: 56,
            depth_levels: 24,
        }
    }
}

/// A voxelization strategy together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Height(HeightParams),
    HueLayer(HueLayerParams),
    StructureDepth(StructureParams),
}

impl Strategy {
    pub fn method(&self) -> Method {
        match self {
            Strategy::Height(_) => Method::Height,
            Strategy::HueLayer(_) => Method::Color,
            Strategy::StructureDepth(_) => Method::Structure,
        }
    }

    pub fn resolution(&self) -> usize {
        match self {
            Strategy::Height(p) => p.resolution,
            Strategy::HueLayer(p) => p.resolution,
            Strategy::StructureDepth(p) => p.resolution,
        }
    }

    /// Size of the z axis: max height, layer count or depth levels.
    pub fn depth(&self) -> usize {
        match self {
            Strategy::Height(p) => p.max_height,
            Strategy::HueLayer(p) => p.layers,
            Strategy::StructureDepth(p) => p.depth_levels,
        }
    }

    fn depth_name(&self) -> &'static str {
        match self {
            Strategy::Height(_) => "max_height",
            Strategy::HueLayer(_) => "layers",
            Strategy::StructureDepth(_) => "depth_levels",
        }
    }

    /// Shape of the grids this strategy produces.
    pub fn shape(&self) -> GridShape {
        let r = self.resolution();
        GridShape::new(r, r, self.depth())
    }

    /// Check parameters without touching any image data.
    pub fn validate(&self) -> Result<()> {
        if self.resolution() == 0 {
            return Err(VoxelError::InvalidResolution(0));
        }
        if self.depth() == 0 {
            return Err(VoxelError::InvalidParameter {
                name: self.depth_name(),
                value: 0,
            });
        }
        Ok(())
    }

    /// Resample `image` and voxelize it.
    pub fn run(&self, image: &PixelBuffer) -> Result<StrategyResult> {
        self.validate()?;
        let sample = resize_area(image, self.resolution())?;
        let mut builder = VolumeBuilder::new(self.shape());

        match self {
            Strategy::Height(p) => height::voxelize(&sample, p.max_height, &mut builder),
            Strategy::HueLayer(p) => hue::voxelize(&sample, p.layers, &mut builder),
            Strategy::StructureDepth(p) => structure::voxelize(&sample, p.depth_levels, &mut builder),
        }

        let (occupancy, colors, count) = builder.into_parts();
        Ok(StrategyResult {
            occupancy,
            colors,
            count,
            method: self.method(),
        })
    }
}

/// Output of one strategy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyResult {
    occupancy: OccupancyGrid,
    colors: ColorGrid,
    count: usize,
    method: Method,
}

impl StrategyResult {
    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    pub fn colors(&self) -> &ColorGrid {
        &self.colors
    }

    /// Number of occupied voxels.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn shape(&self) -> GridShape {
        self.occupancy.shape()
    }
}
