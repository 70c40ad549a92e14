//! Converts an external monotonic timestamp into per-frame elapsed time.

/// Per-scene frame clock.
///
/// Remembers the previous timestamp and hands out the difference. The first
/// tick yields zero, and a timestamp that goes backwards yields zero instead of
/// a negative delta so bodies never run in reverse.
#[derive(Clone, Debug, Default)]
pub struct OrbitalClock {
    last_timestamp: Option<f64>,
}

impl OrbitalClock {
    /// Creates a clock that has not seen any timestamp yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `now` (seconds) and returns the elapsed time since the previous tick.
    pub fn tick(&mut self, now: f64) -> f64 {
        if !now.is_finite() {
            log::debug!("ignoring non-finite timestamp {now}");
            return 0.0;
        }

        let Some(last) = self.last_timestamp.replace(now) else {
            return 0.0;
        };

        let delta = now - last;
        if delta < 0.0 {
            log::debug!(
                "timestamp went backwards by {:.6}s, clamping delta to zero",
                -delta
            );
            return 0.0;
        }
        delta
    }

    /// The most recent timestamp, or `None` before the first tick.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }
}
