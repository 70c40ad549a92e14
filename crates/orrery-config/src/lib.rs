//! Configuration for the orrery.
//!
//! Holds the static body table and the settings of the frame driver, audio
//! and logging. Settings are read once at startup from RON, persisted back as
//! RON when no file exists yet, and accept CLI overrides via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AudioConfig, Config, DebugConfig, DriverConfig, MIN_FRAME_RATE, SceneConfig,
    default_config_dir,
};
pub use error::ConfigError;
