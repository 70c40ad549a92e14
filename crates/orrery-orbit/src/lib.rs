//! Orbital motion and scene composition for a scaled star-system model.
//!
//! Bodies follow coplanar circular orbits advanced kinematically from elapsed
//! time. Each frame the [`SceneAssembler`] turns the static body table plus the
//! live per-body state into a renderer-agnostic list of [`RenderNode`]s: a guide
//! path, a textured sphere and an optional ring for every orbiting body, with
//! the central star, scene lights and star backdrop composed once.

mod backdrop;
mod body;
mod clock;
mod compose;
mod error;
mod orbit_path;
mod scene;
mod selection;

pub use backdrop::{
    Backdrop, DirectionalLight, StarPoint, StarfieldGenerator, StarfieldSettings, compose_backdrop,
};
pub use body::{BodyDescriptor, BodyId, BodyState, CentralBody, SPIN_RATE, advance};
pub use clock::OrbitalClock;
pub use compose::{
    ComposedBody, GUIDE_OPACITY, Geometry, Light, LightKind, NodeKind, RING_INNER_RADIUS,
    RING_OPACITY, RING_OUTER_RADIUS, RING_SEGMENTS, RING_TILT, RenderNode, SPHERE_SEGMENTS,
    compose, compose_central,
};
pub use error::DescriptorError;
pub use orbit_path::{OrbitPath, OrbitPathCache, PATH_SEGMENTS, build_path};
pub use scene::{Frame, SceneAssembler, ScenePhase, SharedScene};
pub use selection::{SelectionBridge, SelectionSummary, display_name};
