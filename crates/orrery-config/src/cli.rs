//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Real-time scaled star-system model")]
pub struct CliArgs {
    /// Seed for the initial orbital phases.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Target frames per second.
    #[arg(long)]
    pub frame_rate: Option<f64>,

    /// Take timestamps from the wall clock.
    #[arg(long)]
    pub realtime: bool,

    /// Select a body by name after the first frame. Repeat to pick several;
    /// the last one wins.
    #[arg(long = "pick", value_name = "NAME")]
    pub picks: Vec<String>,

    /// Start with the theme song playing.
    #[arg(long)]
    pub play_theme: bool,

    /// Print the final frame as JSON on stdout.
    #[arg(long)]
    pub dump: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.driver.frames = frames;
        }
        if let Some(rate) = args.frame_rate {
            self.driver.frame_rate = rate;
        }
        if args.realtime {
            self.driver.realtime = true;
        }
        if args.play_theme {
            self.audio.autoplay = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
