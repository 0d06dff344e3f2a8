//! Configuration file handling for image-voxelizer.
//!
//! Loads configuration from `~/.config/image-voxelizer/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::convert::ConversionParams;
use crate::preview::DEFAULT_MAX_VOXELS;
use crate::voxel::{HeightParams, HueLayerParams, StructureParams};

/// Configuration file structure for image-voxelizer.
/// Loaded from ~/.config/image-voxelizer/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub height: HeightParams,
    #[serde(default)]
    pub color: HueLayerParams,
    #[serde(default)]
    pub structure: StructureParams,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ConversionConfig {
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            format: None,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PreviewConfig {
    #[serde(default = "default_max_voxels")]
    pub max_voxels: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_voxels: DEFAULT_MAX_VOXELS,
            seed: None,
            colored: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_max_voxels() -> usize {
    DEFAULT_MAX_VOXELS
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Strategy parameters as configured.
    pub fn conversion_params(&self) -> ConversionParams {
        ConversionParams {
            height: self.height,
            color: self.color,
            structure: self.structure,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("image-voxelizer").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/image-voxelizer/config.toml")
        })
}

/// Commented default configuration written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# image-voxelizer configuration

[conversion]
# Run strategies in parallel when method = all
parallel = true

[height]
# Grid resolution (x and y)
resolution = 64
# Number of z levels; brightness 255 fills all of them
max_height = 32

[color]
resolution = 48
# Number of hue layers
layers = 16

[structure]
resolution = 56
# Number of depth levels derived from distance to edges
depth_levels = 24

[output]
# Directory for <method>_voxels.<ext> files
directory = "output"
# Format: bin, json
format = "bin"

[preview]
# Voxels above this budget are randomly subsampled
max_voxels = 8000
# Fixed seed for reproducible subsampling
# seed = 42
# 24-bit ANSI colors
colored = true
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.conversion_params(), ConversionParams::default());
    }

    #[test]
    fn test_default_config_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.conversion_params(), ConversionParams::default());
        assert!(config.conversion.parallel);
        assert_eq!(config.output.format.as_deref(), Some("bin"));
        assert_eq!(config.preview.max_voxels, 8000);
    }

    #[test]
    fn test_partial_section() {
        let config: Config = toml::from_str("[height]\nmax_height = 8\n").unwrap();
        assert_eq!(config.height.max_height, 8);
        assert_eq!(config.height.resolution, 64);
        assert_eq!(config.color, HueLayerParams::default());
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[height\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
