//! Subcommand handlers for convert and config actions.

use clap::ValueEnum;
use std::path::{Path, PathBuf};

use super::args::{ConfigAction, ConvertArgs};
use super::enums::OutputFormat;
use crate::config::{default_path, Config, ConfigError, DEFAULT_CONFIG};
use crate::convert::Converter;
use crate::encoder::encode;
use crate::error::VoxelError;
use crate::preview::{render_top_down, subsample};
use crate::sink::{self, Format, SinkError};
use crate::voxel::MethodSelector;

/// Errors surfaced by subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Voxel(#[from] VoxelError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown output format '{0}' in config. Use bin or json")]
    InvalidFormat(String),

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format: command line first, then config, then binary.
fn resolve_format(args: &ConvertArgs, config: &Config) -> Result<Format, CommandError> {
    if let Some(format) = args.format {
        return Ok(format.into());
    }
    match config.output.format.as_deref() {
        Some(name) => OutputFormat::from_str(name, true)
            .map(Format::from)
            .map_err(|_| CommandError::InvalidFormat(name.to_string())),
        None => Ok(Format::default()),
    }
}

/// Convert the input image and write one file per method.
///
/// Returns the written paths in run order.
pub fn run_convert(args: &ConvertArgs, config: &Config) -> Result<Vec<PathBuf>, CommandError> {
    let mut params = config.conversion_params();
    if let Some(r) = args.resolution {
        params = params.with_resolution(r);
    }
    if let Some(h) = args.max_height {
        params = params.with_max_height(h);
    }
    if let Some(l) = args.layers {
        params = params.with_layers(l);
    }
    if let Some(d) = args.depth_levels {
        params = params.with_depth_levels(d);
    }

    let format = resolve_format(args, config)?;
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let selector = MethodSelector::from(args.method);

    let image = crate::loader::load_image(&args.input)?;
    let converter = Converter::new(params).with_parallel(config.conversion.parallel && !args.sequential);
    let results = converter.convert(&image, selector)?;

    let budget = args.max_voxels.unwrap_or(config.preview.max_voxels);
    let seed = args.seed.or(config.preview.seed);
    let colored = config.preview.colored && !args.no_color;

    let mut written = Vec::with_capacity(results.len());
    for (method, result) in results.iter() {
        let volume = encode(result);
        let path = output_dir.join(sink::file_name(method, format));
        written.push(sink::save(&volume, &path)?);

        if args.visualize {
            let indices = subsample(&volume, budget, seed);
            print!("{}", render_top_down(&volume, &indices, colored));
        }
    }

    println!("Conversion complete! Results saved to {}", output_dir.display());
    Ok(written)
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<(), CommandError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&config_path))?;
            let params = config.conversion_params();

            println!("Current configuration:");
            println!(
                "  Height:    resolution {}, max_height {}",
                params.height.resolution, params.height.max_height
            );
            println!(
                "  Color:     resolution {}, layers {}",
                params.color.resolution, params.color.layers
            );
            println!(
                "  Structure: resolution {}, depth_levels {}",
                params.structure.resolution, params.structure.depth_levels
            );
            println!("  Parallel:  {}", if config.conversion.parallel { "yes" } else { "no" });
            println!("  Output:    {}", config.output.directory.display());
            println!(
                "  Format:    {}",
                config.output.format.as_deref().unwrap_or("bin")
            );
            println!("  Preview:   {} voxels max", config.preview.max_voxels);
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Err(CommandError::ConfigExists(config_path));
            }

            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&config_path, DEFAULT_CONFIG)?;

            println!("Created config file: {}", config_path.display());
        }
    }

    Ok(())
}
