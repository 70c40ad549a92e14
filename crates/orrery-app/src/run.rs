//! Runs a configured scene for a fixed number of frames.

use std::io::Write;
use std::time::{Duration, Instant};

use orrery_config::Config;
use orrery_orbit::{DescriptorError, Frame, RenderNode, SceneAssembler, SelectionSummary};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::driver::{FrameDriver, SteppedClock, TimeSource, WallClock};
use crate::overlay::{ThemeState, ThemeToggle, details_panel};

/// Errors that stop a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to assemble scene: {0}")]
    Scene(#[from] DescriptorError),

    #[error("frame rate {0} has no representable frame period")]
    FramePeriod(f64),

    #[error("failed to write frame dump: {0}")]
    Dump(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// What a finished run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub seed: u64,
    pub frames: u64,
    pub slow_frames: u64,
    pub selection: Option<SelectionSummary>,
    pub theme: ThemeState,
}

#[derive(Serialize)]
struct FrameDump<'a> {
    frame: u64,
    delta: f64,
    nodes: Vec<&'a RenderNode>,
    selection: Option<&'a SelectionSummary>,
}

/// Assembles the configured scene and drives it for `config.driver.frames` frames.
///
/// `picks` are dispatched by name after the first frame, in order, or right
/// away when no frames are run. When `dump` is given, the final frame is
/// written to it as JSON.
pub fn run(
    config: &Config,
    picks: &[String],
    dump: Option<&mut dyn Write>,
) -> Result<RunReport, AppError> {
    let seed = config.scene.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        bodies = config.scene.bodies.len(),
        "Assembling scene"
    );
    let mut scene = SceneAssembler::with_seed(
        &config.scene.central,
        &config.scene.backdrop,
        config.scene.bodies.clone(),
        seed,
    )?;

    let mut theme = ThemeToggle::new(config.audio.theme_volume);
    if config.audio.autoplay {
        theme.toggle();
    }
    match theme.applied_volume() {
        Some(volume) => info!(volume, source = %config.audio.theme_source, "Theme playing"),
        None => debug!("Theme paused ({})", theme.label()),
    }

    let (frames, slow_frames) = if config.driver.realtime {
        let rate = config.driver.frame_rate;
        let period =
            Duration::try_from_secs_f64(1.0 / rate).map_err(|_| AppError::FramePeriod(rate))?;
        drive(&mut scene, WallClock::new(), config.driver.frames, picks, Some(period))
    } else {
        let clock = SteppedClock::from_frame_rate(config.driver.frame_rate);
        drive(&mut scene, clock, config.driver.frames, picks, None)
    };

    let frame = scene.frame();
    match details_panel(frame.selection) {
        Some(panel) => {
            for line in panel.to_string().lines() {
                info!("{line}");
            }
        }
        None => info!("No body selected"),
    }

    if let Some(out) = dump {
        write_dump(out, scene.frame_count(), frame)?;
    }

    info!(frames, slow_frames, "Run finished");
    Ok(RunReport {
        seed,
        frames,
        slow_frames,
        selection: frame.selection.cloned(),
        theme: theme.state(),
    })
}

fn drive<T: TimeSource>(
    scene: &mut SceneAssembler,
    source: T,
    frames: u64,
    picks: &[String],
    pace: Option<Duration>,
) -> (u64, u64) {
    let mut driver = FrameDriver::new(source);
    if frames == 0 {
        dispatch_picks(scene, picks);
    }
    for index in 0..frames {
        let started = Instant::now();
        driver.run_frame(scene, |frame| {
            debug!(delta = frame.delta, nodes = frame.nodes().count(), "Frame composed");
        });

        if index == 0 {
            dispatch_picks(scene, picks);
        }

        if let Some(period) = pace {
            std::thread::sleep(period.saturating_sub(started.elapsed()));
        }
    }
    (driver.frame_count(), driver.slow_frames())
}

fn dispatch_picks(scene: &mut SceneAssembler, picks: &[String]) {
    for name in picks {
        match scene.pick_by_name(name) {
            Some(summary) => info!("Selected {}", summary.display_name),
            None => warn!("No body named {name:?}"),
        }
    }
}

fn write_dump(out: &mut dyn Write, frame_index: u64, frame: Frame<'_>) -> Result<(), AppError> {
    let dump = FrameDump {
        frame: frame_index,
        delta: frame.delta,
        nodes: frame.nodes().collect(),
        selection: frame.selection,
    };
    serde_json::to_writer_pretty(&mut *out, &dump)?;
    writeln!(out)?;
    Ok(())
}
