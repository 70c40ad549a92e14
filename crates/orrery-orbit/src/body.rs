//! Static body descriptors and the per-body orbital state they drive.

use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// Self-rotation rate of every orbiting body, in radians per second.
pub const SPIN_RATE: f64 = 0.6;

/// Stable identity of an orbiting body: its index in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    /// Registration index of this body.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable description of one orbiting body, fixed at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Orbit radius in scene units.
    pub distance_from_center: f64,
    /// Sphere radius in scene units.
    pub visual_size: f64,
    /// Phase advance in radians per second.
    pub angular_speed: f64,
    /// Texture identity resolved by the renderer, e.g. `/textures/2k_earth.jpg`.
    pub texture_id: String,
    /// Whether a ring is attached to the body.
    #[serde(default)]
    pub has_ring: bool,
}

impl BodyDescriptor {
    /// Creates a ringless descriptor.
    pub fn new(
        distance_from_center: f64,
        visual_size: f64,
        angular_speed: f64,
        texture_id: impl Into<String>,
    ) -> Self {
        Self {
            distance_from_center,
            visual_size,
            angular_speed,
            texture_id: texture_id.into(),
            has_ring: false,
        }
    }

    /// Returns the same descriptor with a ring attached.
    pub fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }

    /// Checks that distance, size and speed are positive and the texture is named.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        positive("distance_from_center", self.distance_from_center)?;
        positive("visual_size", self.visual_size)?;
        positive("angular_speed", self.angular_speed)?;
        if self.texture_id.is_empty() {
            return Err(DescriptorError::EmptyTexture);
        }
        Ok(())
    }

    /// Orbital period as shown to the user: the reciprocal of the angular speed.
    pub fn orbital_period(&self) -> f64 {
        1.0 / self.angular_speed
    }

    /// Position on the orbit circle for a phase angle. Any real angle is valid.
    pub fn position_at(&self, phase_angle: f64) -> DVec3 {
        DVec3::new(
            phase_angle.cos() * self.distance_from_center,
            0.0,
            phase_angle.sin() * self.distance_from_center,
        )
    }
}

/// The emissive body fixed at the origin. It never moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralBody {
    /// Sphere radius in scene units.
    pub visual_size: f64,
    /// Texture identity resolved by the renderer.
    pub texture_id: String,
    /// Intensity of the point light emitted from the center.
    pub light_intensity: f32,
}

impl Default for CentralBody {
    fn default() -> Self {
        Self {
            visual_size: 3.0,
            texture_id: "/textures/2k_sun.jpg".to_string(),
            light_intensity: 2.0,
        }
    }
}

impl CentralBody {
    /// Checks size, texture and light intensity.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        positive("visual_size", self.visual_size)?;
        if self.texture_id.is_empty() {
            return Err(DescriptorError::EmptyTexture);
        }
        if !self.light_intensity.is_finite() || self.light_intensity < 0.0 {
            return Err(DescriptorError::InvalidLight(self.light_intensity));
        }
        Ok(())
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<(), DescriptorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DescriptorError::NotPositive { field, value })
    }
}

/// Mutable orbital state of one body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyState {
    /// Current angular position along the orbit, in radians. Never wrapped.
    pub phase_angle: f64,
    /// Phase the body started from.
    pub initial_phase_offset: f64,
    /// Rotation about the body's own vertical axis, in radians.
    pub spin_angle: f64,
}

impl BodyState {
    /// State starting at a known phase.
    pub fn with_phase(initial_phase_offset: f64) -> Self {
        Self {
            phase_angle: initial_phase_offset,
            initial_phase_offset,
            spin_angle: 0.0,
        }
    }

    /// State starting at a phase drawn uniformly from `[0, 2π)`.
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::with_phase(rng.random_range(0.0..TAU))
    }

    /// Current position of the body described by `descriptor`.
    pub fn position(&self, descriptor: &BodyDescriptor) -> DVec3 {
        descriptor.position_at(self.phase_angle)
    }
}

/// Advances a body by `delta_time` seconds.
///
/// Must run exactly once per body per tick.
pub fn advance(state: BodyState, descriptor: &BodyDescriptor, delta_time: f64) -> BodyState {
    BodyState {
        phase_angle: state.phase_angle + descriptor.angular_speed * delta_time,
        spin_angle: state.spin_angle + SPIN_RATE * delta_time,
        ..state
    }
}
