use clap::Parser;
use tracing_subscriber::EnvFilter;

use image_voxelizer::cli::{handle_config_action, run_convert, Args, Command};
use image_voxelizer::config::Config;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Convert(convert_args) => Config::load(args.config.as_deref())
            .map_err(Into::into)
            .and_then(|config| run_convert(&convert_args, &config).map(|_| ())),
        Command::Config { action } => handle_config_action(action, args.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
