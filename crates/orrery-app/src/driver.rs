//! Headless frame driver standing in for the render loop.
//!
//! Pulls a timestamp from a [`TimeSource`] once per frame, ticks the scene with
//! it and hands the composed frame to a render callback.

use std::time::Instant;

use orrery_orbit::{Frame, SceneAssembler};
use tracing::warn;

/// Frames longer than this are reported. They are not clamped: the clock
/// passes the full delta through so bodies stay in step with wall time.
pub const SLOW_FRAME_THRESHOLD: f64 = 0.25;

/// Produces monotonic frame timestamps in seconds.
pub trait TimeSource {
    fn now(&mut self) -> f64;
}

/// Seconds since the clock was created.
#[derive(Debug, Clone)]
pub struct WallClock {
    start: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn now(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Fixed-step timestamps: `0, step, 2 * step, ...`.
#[derive(Debug, Clone)]
pub struct SteppedClock {
    step: f64,
    index: u64,
}

impl SteppedClock {
    pub fn new(step: f64) -> Self {
        Self { step, index: 0 }
    }

    /// A clock stepping at `frame_rate` frames per second.
    pub fn from_frame_rate(frame_rate: f64) -> Self {
        Self::new(1.0 / frame_rate)
    }
}

impl TimeSource for SteppedClock {
    fn now(&mut self) -> f64 {
        // Multiplying instead of accumulating keeps long runs free of drift.
        let now = self.index as f64 * self.step;
        self.index += 1;
        now
    }
}

/// Drives a scene one frame at a time.
pub struct FrameDriver<T> {
    source: T,
    frame_count: u64,
    slow_frames: u64,
}

impl<T: TimeSource> FrameDriver<T> {
    pub fn new(source: T) -> Self {
        Self {
            source,
            frame_count: 0,
            slow_frames: 0,
        }
    }

    /// Ticks `scene` with the next timestamp and calls `render_fn` exactly once
    /// with the composed frame. Returns the frame's delta.
    pub fn run_frame(
        &mut self,
        scene: &mut SceneAssembler,
        mut render_fn: impl FnMut(Frame<'_>),
    ) -> f64 {
        let now = self.source.now();
        let frame = scene.tick(now);
        let delta = frame.delta;

        if delta > SLOW_FRAME_THRESHOLD {
            self.slow_frames += 1;
            warn!(
                "Frame time {:.1}ms exceeds {:.1}ms",
                delta * 1000.0,
                SLOW_FRAME_THRESHOLD * 1000.0
            );
        }

        render_fn(frame);
        self.frame_count += 1;
        delta
    }

    /// Total number of frames driven.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of frames whose delta exceeded [`SLOW_FRAME_THRESHOLD`].
    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }
}
