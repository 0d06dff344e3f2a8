//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{MethodArg, OutputFormat};

/// Convert 2D images into 3D voxel volumes
#[derive(Parser, Debug)]
#[command(name = "image-voxelizer")]
#[command(version, about = "Convert images into 3D voxel volumes", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Run all three methods, write output/<method>_voxels.bin
    image-voxelizer convert -i photo.jpg

    # Height method at 128x128 with taller columns, as JSON
    image-voxelizer convert -i photo.jpg -m height -r 128 --max-height 64 -f json

    # Preview the result in the terminal
    image-voxelizer convert -i photo.jpg -m structure -v")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to voxels
    Convert(ConvertArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConvertArgs {
    /// Input image path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory (default: from config, else "output")
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Conversion method
    #[arg(short, long, default_value = "all")]
    pub method: MethodArg,

    /// Voxel grid resolution for every method
    #[arg(short, long)]
    pub resolution: Option<usize>,

    /// Height method: number of z levels
    #[arg(long)]
    pub max_height: Option<usize>,

    /// Color method: number of hue layers
    #[arg(long)]
    pub layers: Option<usize>,

    /// Structure method: number of depth levels
    #[arg(long)]
    pub depth_levels: Option<usize>,

    /// Output format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Show a terminal preview of each result
    #[arg(short, long)]
    pub visualize: bool,

    /// Preview voxel budget
    #[arg(long)]
    pub max_voxels: Option<usize>,

    /// Seed for preview subsampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable ANSI colors in the preview
    #[arg(long)]
    pub no_color: bool,

    /// Run methods one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_args(extra: &[&str]) -> ConvertArgs {
        let mut argv = vec!["image-voxelizer", "convert", "-i", "in.png"];
        argv.extend_from_slice(extra);
        match Args::parse_from(argv).command {
            Command::Convert(args) => args,
            other => panic!("Expected Convert subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_defaults() {
        let args = convert_args(&[]);
        assert_eq!(args.input, PathBuf::from("in.png"));
        assert!(args.output.is_none());
        assert_eq!(args.method, MethodArg::All);
        assert!(args.resolution.is_none());
        assert!(args.max_height.is_none());
        assert!(args.layers.is_none());
        assert!(args.depth_levels.is_none());
        assert!(args.format.is_none());
        assert!(!args.visualize);
        assert!(!args.no_color);
        assert!(!args.sequential);
    }

    #[test]
    fn test_convert_requires_input() {
        assert!(Args::try_parse_from(["image-voxelizer", "convert"]).is_err());
    }

    #[test]
    fn test_method_values() {
        assert_eq!(convert_args(&["-m", "height"]).method, MethodArg::Height);
        assert_eq!(convert_args(&["--method", "color"]).method, MethodArg::Color);
        assert_eq!(convert_args(&["--method", "hue"]).method, MethodArg::Color);
        assert_eq!(convert_args(&["-m", "structure"]).method, MethodArg::Structure);
        assert!(Args::try_parse_from(["image-voxelizer", "convert", "-i", "a", "-m", "mesh"]).is_err());
    }

    #[test]
    fn test_combined_options() {
        let args = convert_args(&[
            "-o",
            "out",
            "-r",
            "32",
            "--max-height",
            "16",
            "--layers",
            "8",
            "--depth-levels",
            "12",
            "-f",
            "json",
            "-v",
            "--max-voxels",
            "100",
            "--seed",
            "3",
            "--no-color",
            "--sequential",
        ]);
        assert_eq!(args.output, Some(PathBuf::from("out")));
        assert_eq!(args.resolution, Some(32));
        assert_eq!(args.max_height, Some(16));
        assert_eq!(args.layers, Some(8));
        assert_eq!(args.depth_levels, Some(12));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.visualize);
        assert_eq!(args.max_voxels, Some(100));
        assert_eq!(args.seed, Some(3));
        assert!(args.no_color);
        assert!(args.sequential);
    }

    #[test]
    fn test_global_flags() {
        let args = Args::parse_from([
            "image-voxelizer",
            "convert",
            "-i",
            "a.png",
            "--verbose",
            "-c",
            "/tmp/test.toml",
        ]);
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/test.toml")));
    }

    #[test]
    fn test_config_subcommands() {
        let args = Args::parse_from(["image-voxelizer", "config", "show"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Show
            }
        ));

        let args = Args::parse_from(["image-voxelizer", "config", "init"]);
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Init
            }
        ));
    }
}
