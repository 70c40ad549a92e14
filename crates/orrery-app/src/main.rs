//! The binary entry point for the orrery.
//!
//! Loads `config.ron`, applies CLI overrides, initializes logging and drives
//! the scene headlessly.
//!
//! Run with: `cargo run -p orrery-app -- --pick saturn --dump`

use clap::Parser;
use orrery_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);
    let mut config = match config_dir.as_deref() {
        Some(dir) => match Config::load_or_create(dir) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config from {}: {e}", dir.display());
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    orrery_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    info!(
        "Orrery: {} bodies, {} frames at {} fps{}",
        config.scene.bodies.len(),
        config.driver.frames,
        config.driver.frame_rate,
        if config.driver.realtime { " (realtime)" } else { "" }
    );

    let mut stdout = std::io::stdout();
    let dump: Option<&mut dyn std::io::Write> = if args.dump {
        Some(&mut stdout)
    } else {
        None
    };

    if let Err(e) = orrery_app::run(&config, &args.picks, dump) {
        error!("{e}");
        std::process::exit(1);
    }
}
