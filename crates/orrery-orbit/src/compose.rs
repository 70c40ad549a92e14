//! Renderer-agnostic node composition.
//!
//! The composer never touches textures or GPU resources. It only describes
//! what to draw and where; the rendering collaborator owns everything else.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::DVec3;
use serde::Serialize;

use crate::backdrop::StarPoint;
use crate::body::{BodyDescriptor, BodyId, BodyState, CentralBody};
use crate::orbit_path::{OrbitPath, OrbitPathCache};

/// Width and height segment count of every body sphere.
pub const SPHERE_SEGMENTS: u32 = 32;
/// Inner ring radius. Fixed, not scaled by the body's size.
pub const RING_INNER_RADIUS: f64 = 2.0;
/// Outer ring radius. Fixed, not scaled by the body's size.
pub const RING_OUTER_RADIUS: f64 = 2.5;
/// Angular segment count of a ring.
pub const RING_SEGMENTS: u32 = 64;
/// Ring opacity.
pub const RING_OPACITY: f32 = 0.5;
/// Rotation about x that lays a ring flat in the orbital plane.
pub const RING_TILT: f64 = -FRAC_PI_2;
/// Guide path opacity.
pub const GUIDE_OPACITY: f32 = 0.2;

/// What a node draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Body,
    Ring,
    GuidePath,
    /// A light with no geometry of its own.
    Light,
    Starfield,
}

/// Geometry parameters of a node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Geometry {
    /// Textured sphere, rotated `spin` radians about its vertical axis.
    Sphere { radius: f64, segments: u32, spin: f64 },
    /// Flat double-sided annulus, rotated `tilt` radians about x.
    Annulus {
        inner_radius: f64,
        outer_radius: f64,
        segments: u32,
        tilt: f64,
        opacity: f32,
    },
    /// Open polyline through the given points.
    Polyline { path: Arc<OrbitPath>, opacity: f32 },
    /// Point sprites, one per star.
    Points {
        stars: Arc<[StarPoint]>,
        saturation: f32,
        fade: bool,
    },
    /// Nothing to draw.
    Empty,
}

/// How a light spreads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LightKind {
    /// Radiates from the node's position.
    Point,
    /// Lights everything evenly.
    Ambient,
    /// Parallel rays from the node's position toward the origin.
    Directional,
}

/// Light emitted by a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Light {
    pub kind: LightKind,
    pub intensity: f32,
}

impl Light {
    pub fn point(intensity: f32) -> Self {
        Self {
            kind: LightKind::Point,
            intensity,
        }
    }

    pub fn ambient(intensity: f32) -> Self {
        Self {
            kind: LightKind::Ambient,
            intensity,
        }
    }

    pub fn directional(intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            intensity,
        }
    }
}

/// One drawable primitive handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
    pub kind: NodeKind,
    /// World position, or `None` for geometry already expressed in world space.
    pub position: Option<DVec3>,
    pub geometry: Geometry,
    /// Texture identity for the renderer to resolve.
    pub texture: Option<String>,
    pub light: Option<Light>,
    /// Body selected when the renderer reports a pick on this node.
    pub pick: Option<BodyId>,
}

/// All nodes derived from one orbiting body.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComposedBody {
    pub id: BodyId,
    pub guide: RenderNode,
    pub body: RenderNode,
    pub ring: Option<RenderNode>,
}

impl ComposedBody {
    /// Nodes in draw order: guide path, body, then ring if present.
    pub fn nodes(&self) -> impl Iterator<Item = &RenderNode> {
        [Some(&self.guide), Some(&self.body), self.ring.as_ref()]
            .into_iter()
            .flatten()
    }
}

/// Composes the guide path, body sphere and optional ring of one body.
pub fn compose(
    id: BodyId,
    descriptor: &BodyDescriptor,
    state: &BodyState,
    paths: &mut OrbitPathCache,
) -> ComposedBody {
    let position = state.position(descriptor);

    let guide = RenderNode {
        kind: NodeKind::GuidePath,
        position: None,
        geometry: Geometry::Polyline {
            path: paths.get_or_build(descriptor.distance_from_center),
            opacity: GUIDE_OPACITY,
        },
        texture: None,
        light: None,
        pick: None,
    };

    let body = RenderNode {
        kind: NodeKind::Body,
        position: Some(position),
        geometry: Geometry::Sphere {
            radius: descriptor.visual_size,
            segments: SPHERE_SEGMENTS,
            spin: state.spin_angle,
        },
        texture: Some(descriptor.texture_id.clone()),
        light: None,
        pick: Some(id),
    };

    // The ring is a child of the body, so picks on it select the body too.
    let ring = descriptor.has_ring.then(|| RenderNode {
        kind: NodeKind::Ring,
        position: Some(position),
        geometry: Geometry::Annulus {
            inner_radius: RING_INNER_RADIUS,
            outer_radius: RING_OUTER_RADIUS,
            segments: RING_SEGMENTS,
            tilt: RING_TILT,
            opacity: RING_OPACITY,
        },
        texture: None,
        light: None,
        pick: Some(id),
    });

    ComposedBody {
        id,
        guide,
        body,
        ring,
    }
}

/// Composes the static central body at the origin.
pub fn compose_central(central: &CentralBody) -> RenderNode {
    RenderNode {
        kind: NodeKind::Body,
        position: Some(DVec3::ZERO),
        geometry: Geometry::Sphere {
            radius: central.visual_size,
            segments: SPHERE_SEGMENTS,
            spin: 0.0,
        },
        texture: Some(central.texture_id.clone()),
        light: Some(Light::point(central.light_intensity)),
        pick: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturn() -> BodyDescriptor {
        BodyDescriptor::new(21.0, 9.4, 0.3, "/textures/2k_saturn.jpg").with_ring()
    }

    #[test]
    fn test_body_node_at_orbit_position() {
        let mut paths = OrbitPathCache::new();
        let descriptor = BodyDescriptor::new(10.0, 1.0, 1.0, "/textures/2k_earth.jpg");
        let state = BodyState::with_phase(std::f64::consts::PI);
        let composed = compose(BodyId(2), &descriptor, &state, &mut paths);

        let pos = composed.body.position.unwrap();
        assert!((pos - DVec3::new(-10.0, 0.0, 0.0)).length() < 1e-9);
        assert_eq!(composed.body.kind, NodeKind::Body);
        assert_eq!(
            composed.body.texture.as_deref(),
            Some("/textures/2k_earth.jpg")
        );
        assert_eq!(composed.body.pick, Some(BodyId(2)));
        assert!(composed.ring.is_none());
        assert_eq!(composed.nodes().count(), 2);
    }

    #[test]
    fn test_guide_path_uses_orbit_radius() {
        let mut paths = OrbitPathCache::new();
        let composed = compose(BodyId(0), &saturn(), &BodyState::with_phase(0.3), &mut paths);

        assert_eq!(composed.guide.kind, NodeKind::GuidePath);
        assert!(composed.guide.position.is_none());
        assert!(composed.guide.pick.is_none());
        match &composed.guide.geometry {
            Geometry::Polyline { path, opacity } => {
                assert_eq!(path.radius(), 21.0);
                assert_eq!(*opacity, GUIDE_OPACITY);
            }
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn test_guide_path_independent_of_phase() {
        let mut paths = OrbitPathCache::new();
        let a = compose(BodyId(0), &saturn(), &BodyState::with_phase(0.0), &mut paths);
        let b = compose(BodyId(0), &saturn(), &BodyState::with_phase(4.0), &mut paths);
        assert_eq!(a.guide, b.guide);
        assert_ne!(a.body, b.body);
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn test_ring_uses_fixed_radii() {
        let mut paths = OrbitPathCache::new();
        let mut small = saturn();
        small.visual_size = 0.1;
        for descriptor in [saturn(), small] {
            let composed = compose(BodyId(5), &descriptor, &BodyState::with_phase(1.0), &mut paths);
            let ring = composed.ring.as_ref().unwrap();
            assert_eq!(ring.kind, NodeKind::Ring);
            assert_eq!(ring.position, composed.body.position);
            assert_eq!(ring.pick, Some(BodyId(5)));
            assert_eq!(
                ring.geometry,
                Geometry::Annulus {
                    inner_radius: 2.0,
                    outer_radius: 2.5,
                    segments: 64,
                    tilt: -FRAC_PI_2,
                    opacity: 0.5,
                }
            );
            let kinds: Vec<NodeKind> = composed.nodes().map(|n| n.kind).collect();
            assert_eq!(kinds, [NodeKind::GuidePath, NodeKind::Body, NodeKind::Ring]);
        }
    }

    #[test]
    fn test_sphere_carries_spin() {
        let mut paths = OrbitPathCache::new();
        let state = BodyState {
            spin_angle: 1.5,
            ..BodyState::with_phase(0.0)
        };
        let composed = compose(BodyId(0), &saturn(), &state, &mut paths);
        assert_eq!(
            composed.body.geometry,
            Geometry::Sphere {
                radius: 9.4,
                segments: SPHERE_SEGMENTS,
                spin: 1.5
            }
        );
    }

    #[test]
    fn test_central_body_is_static_and_lit() {
        let node = compose_central(&CentralBody::default());
        assert_eq!(node.position, Some(DVec3::ZERO));
        assert_eq!(node.light, Some(Light::point(2.0)));
        assert_eq!(node.texture.as_deref(), Some("/textures/2k_sun.jpg"));
        assert!(node.pick.is_none());
    }

    #[test]
    fn test_node_serializes_with_shape_tag() {
        let node = compose_central(&CentralBody::default());
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["kind"], "Body");
        assert_eq!(json["geometry"]["shape"], "sphere");
        assert_eq!(json["geometry"]["radius"], 3.0);
        assert_eq!(json["light"]["kind"], "Point");
    }

    #[test]
    fn test_empty_geometry_serializes_as_shape_only() {
        let json = serde_json::to_value(Geometry::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "shape": "empty" }));
    }
}
