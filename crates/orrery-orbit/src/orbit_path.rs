//! Closed polyline samples of orbit circles, used for the guide rings.

use std::f64::consts::TAU;
use std::sync::Arc;

use glam::DVec3;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Number of segments in a guide path. The path holds one more point than this
/// so the last point closes the loop onto the first.
pub const PATH_SEGMENTS: usize = 64;

/// A circle of a given radius in the orbital plane, sampled as a closed polyline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrbitPath {
    radius: f64,
    points: Vec<DVec3>,
}

impl OrbitPath {
    /// Radius the path was sampled at.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The `PATH_SEGMENTS + 1` sample points, starting and ending at angle zero.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }
}

/// Samples a circle of `radius` at evenly spaced angles over `[0, 2π]` inclusive.
pub fn build_path(radius: f64) -> OrbitPath {
    let points = (0..=PATH_SEGMENTS)
        .map(|i| {
            let angle = (i as f64 / PATH_SEGMENTS as f64) * TAU;
            DVec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect();
    OrbitPath { radius, points }
}

/// Memoizes guide paths per distinct radius.
#[derive(Debug, Default)]
pub struct OrbitPathCache {
    paths: FxHashMap<u64, Arc<OrbitPath>>,
}

impl OrbitPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared path for `radius`, building it on first request.
    pub fn get_or_build(&mut self, radius: f64) -> Arc<OrbitPath> {
        let path = self.paths.entry(radius.to_bits()).or_insert_with(|| {
            log::trace!("building guide path for radius {radius}");
            Arc::new(build_path(radius))
        });
        Arc::clone(path)
    }

    /// Number of distinct radii cached so far.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
