//! Scene-wide lighting and the star backdrop.
//!
//! These nodes never change once a scene is built: an ambient fill light, one
//! directional key light and a deterministic shell of background stars.

use std::f64::consts::TAU;
use std::sync::Arc;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::body::positive;
use crate::compose::{Geometry, Light, NodeKind, RenderNode};
use crate::error::DescriptorError;

/// A directional light shining from `position` toward the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: DVec3,
    pub intensity: f32,
}

/// Shape of the star shell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    /// Inner radius of the shell.
    pub radius: f64,
    /// Thickness of the shell beyond `radius`.
    pub depth: f64,
    pub count: u32,
    /// Upper bound of a star's point size.
    pub factor: f32,
    /// Color saturation in `0..=1`. Zero draws every star white.
    pub saturation: f32,
    /// Whether stars fade toward the edge of their point sprite.
    pub fade: bool,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            radius: 100.0,
            depth: 50.0,
            count: 5000,
            factor: 4.0,
            saturation: 0.0,
            fade: true,
        }
    }
}

/// Static lighting and stars surrounding the system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backdrop {
    pub ambient_intensity: f32,
    pub directional: DirectionalLight,
    pub stars: StarfieldSettings,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.8,
            directional: DirectionalLight {
                position: DVec3::new(10.0, 10.0, 5.0),
                intensity: 1.0,
            },
            stars: StarfieldSettings::default(),
        }
    }
}

impl Backdrop {
    /// Checks light intensities and the star shell extents.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        for intensity in [self.ambient_intensity, self.directional.intensity] {
            if !intensity.is_finite() || intensity < 0.0 {
                return Err(DescriptorError::InvalidLight(intensity));
            }
        }
        if !self.directional.position.is_finite() || self.directional.position == DVec3::ZERO {
            return Err(DescriptorError::NotPositive {
                field: "directional.position",
                value: self.directional.position.length(),
            });
        }

        let stars = &self.stars;
        positive("stars.radius", stars.radius)?;
        positive("stars.factor", f64::from(stars.factor))?;
        if !stars.depth.is_finite() || stars.depth < 0.0 {
            return Err(DescriptorError::Negative {
                field: "stars.depth",
                value: stars.depth,
            });
        }
        if !(0.0..=1.0).contains(&stars.saturation) {
            return Err(DescriptorError::OutOfUnitRange {
                field: "stars.saturation",
                value: f64::from(stars.saturation),
            });
        }
        Ok(())
    }
}

/// One background star.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StarPoint {
    /// World position inside the star shell.
    pub position: DVec3,
    /// Point size, between half of and the full size factor.
    pub size: f32,
}

/// Generates a deterministic star shell from a seed.
pub struct StarfieldGenerator {
    seed: u64,
    settings: StarfieldSettings,
}

impl StarfieldGenerator {
    pub fn new(seed: u64, settings: StarfieldSettings) -> Self {
        Self { seed, settings }
    }

    /// Generate the stars. Deterministic for a given seed.
    ///
    /// Directions are uniform on the sphere. Distances walk inward from the
    /// outer edge of the shell, so the field stays within
    /// `radius..=radius + depth`.
    pub fn generate(&self) -> Vec<StarPoint> {
        let StarfieldSettings {
            radius,
            depth,
            count,
            factor,
            ..
        } = self.settings;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut stars = Vec::with_capacity(count as usize);
        let step = if count == 0 { 0.0 } else { depth / f64::from(count) };
        let mut distance = radius + depth;

        for _ in 0..count {
            distance -= step * rng.random::<f64>();

            let theta = rng.random::<f64>() * TAU;
            let phi = (1.0 - 2.0 * rng.random::<f64>()).acos();
            let direction = DVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());

            let size = (0.5 + 0.5 * rng.random::<f32>()) * factor;

            stars.push(StarPoint {
                position: direction * distance,
                size,
            });
        }

        stars
    }
}

/// Composes the ambient light, the directional light and the star shell.
///
/// `star_seed` fixes the star placement.
pub fn compose_backdrop(backdrop: &Backdrop, star_seed: u64) -> Vec<RenderNode> {
    let stars: Arc<[StarPoint]> = StarfieldGenerator::new(star_seed, backdrop.stars)
        .generate()
        .into();

    vec![
        RenderNode {
            kind: NodeKind::Light,
            position: None,
            geometry: Geometry::Empty,
            texture: None,
            light: Some(Light::ambient(backdrop.ambient_intensity)),
            pick: None,
        },
        RenderNode {
            kind: NodeKind::Light,
            position: Some(backdrop.directional.position),
            geometry: Geometry::Empty,
            texture: None,
            light: Some(Light::directional(backdrop.directional.intensity)),
            pick: None,
        },
        RenderNode {
            kind: NodeKind::Starfield,
            position: None,
            geometry: Geometry::Points {
                stars,
                saturation: backdrop.stars.saturation,
                fade: backdrop.stars.fade,
            },
            texture: None,
            light: None,
            pick: None,
        },
    ]
}
