//! image-voxelizer library crate.
//!
//! Converts a decoded RGB image into a voxel volume with one of three
//! strategies (height, hue layers, structure depth), and encodes the result
//! as a sparse list of occupied coordinates and colors.
//!
//! ```no_run
//! use image_voxelizer::convert::{ConversionParams, Converter};
//! use image_voxelizer::encoder::encode;
//! use image_voxelizer::voxel::MethodSelector;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = image_voxelizer::loader::load_image("photo.png".as_ref())?;
//! let converter = Converter::new(ConversionParams::default().with_resolution(32));
//! for (method, result) in converter.convert(&image, MethodSelector::All)?.iter() {
//!     let volume = encode(result);
//!     println!("{}: {} voxels in {}", method, volume.len(), volume.shape);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod preview;
pub mod sampler;
pub mod sink;
pub mod voxel;

pub use error::VoxelError;
