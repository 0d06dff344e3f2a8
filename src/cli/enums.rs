//! CLI enum types for method and output format options.

use clap::ValueEnum;

use crate::sink::Format;
use crate::voxel::{Method, MethodSelector};

/// Conversion method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MethodArg {
    Height,
    #[value(alias = "hue")]
    Color,
    Structure,
    #[default]
    All,
}

impl From<MethodArg> for MethodSelector {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Height => MethodSelector::Single(Method::Height),
            MethodArg::Color => MethodSelector::Single(Method::Color),
            MethodArg::Structure => MethodSelector::Single(Method::Structure),
            MethodArg::All => MethodSelector::All,
        }
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Bin,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Bin => Format::Binary,
            OutputFormat::Json => Format::Json,
        }
    }
}
