//! Top-level per-frame orchestration.
//!
//! A [`SceneAssembler`] owns the body table, one [`BodyState`] per body, the
//! frame clock and the current selection. The render loop calls
//! [`tick`](SceneAssembler::tick) once per frame and draws the returned
//! [`Frame`]; the input layer calls [`pick`](SceneAssembler::pick) when the
//! user clicks a node.

use std::sync::{Arc, Mutex};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::backdrop::{Backdrop, compose_backdrop};
use crate::body::{BodyDescriptor, BodyId, BodyState, CentralBody, advance};
use crate::clock::OrbitalClock;
use crate::compose::{ComposedBody, RenderNode, compose, compose_central};
use crate::error::DescriptorError;
use crate::orbit_path::OrbitPathCache;
use crate::selection::{SelectionBridge, SelectionSummary, display_name};

/// A scene shared between threads. Ticks and picks lock the same mutex, so a
/// pick can never observe a half-composed frame.
pub type SharedScene = Arc<Mutex<SceneAssembler>>;

/// Lifecycle of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenePhase {
    /// Built, no frame ticked yet.
    Idle,
    /// At least one frame ticked.
    Running,
}

#[derive(Debug)]
struct TrackedBody {
    id: BodyId,
    descriptor: BodyDescriptor,
    state: BodyState,
}

/// Everything the renderer and overlay need for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Seconds elapsed since the previous frame.
    pub delta: f64,
    /// Scene lights and the star shell, composed once at construction.
    pub backdrop: &'a [RenderNode],
    /// The central body, composed once at construction.
    pub central: &'a RenderNode,
    /// Orbiting bodies in registration order.
    pub bodies: &'a [ComposedBody],
    pub selection: Option<&'a SelectionSummary>,
}

impl<'a> Frame<'a> {
    /// All nodes in draw order: the backdrop, the central body, then every
    /// body's nodes in registration order.
    pub fn nodes(self) -> impl Iterator<Item = &'a RenderNode> {
        self.backdrop
            .iter()
            .chain(std::iter::once(self.central))
            .chain(self.bodies.iter().flat_map(ComposedBody::nodes))
    }
}

/// Owns and advances a star system.
#[derive(Debug)]
pub struct SceneAssembler {
    backdrop_nodes: Vec<RenderNode>,
    central_node: RenderNode,
    bodies: Vec<TrackedBody>,
    clock: OrbitalClock,
    paths: OrbitPathCache,
    selection: SelectionBridge,
    composed: Vec<ComposedBody>,
    phase: ScenePhase,
    last_delta: f64,
    frame_count: u64,
}

impl SceneAssembler {
    /// Builds a scene, drawing each body's initial phase and then the star
    /// placement from `rng`.
    ///
    /// Fails if the central body, the backdrop or any descriptor is invalid.
    pub fn new(
        central: &CentralBody,
        backdrop: &Backdrop,
        descriptors: Vec<BodyDescriptor>,
        rng: &mut impl Rng,
    ) -> Result<Self, DescriptorError> {
        central.validate()?;
        backdrop.validate()?;

        let mut bodies = Vec::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.into_iter().enumerate() {
            descriptor
                .validate()
                .map_err(|source| DescriptorError::Body {
                    index,
                    source: Box::new(source),
                })?;
            bodies.push(TrackedBody {
                id: BodyId(index as u32),
                descriptor,
                state: BodyState::random(rng),
            });
        }

        let star_seed: u64 = rng.random();

        let mut scene = Self {
            backdrop_nodes: compose_backdrop(backdrop, star_seed),
            central_node: compose_central(central),
            bodies,
            clock: OrbitalClock::new(),
            paths: OrbitPathCache::new(),
            selection: SelectionBridge::new(),
            composed: Vec::new(),
            phase: ScenePhase::Idle,
            last_delta: 0.0,
            frame_count: 0,
        };
        scene.recompose();

        log::info!(
            "scene assembled with {} bodies ({} distinct orbits)",
            scene.bodies.len(),
            scene.paths.len()
        );
        Ok(scene)
    }

    /// Builds a scene whose initial phases and stars are reproducible from `seed`.
    pub fn with_seed(
        central: &CentralBody,
        backdrop: &Backdrop,
        descriptors: Vec<BodyDescriptor>,
        seed: u64,
    ) -> Result<Self, DescriptorError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::new(central, backdrop, descriptors, &mut rng)
    }

    /// Wraps the scene for use from several threads.
    pub fn into_shared(self) -> SharedScene {
        Arc::new(Mutex::new(self))
    }

    /// Advances every body to `now` (seconds) and recomposes the frame.
    pub fn tick(&mut self, now: f64) -> Frame<'_> {
        let delta = self.clock.tick(now);

        for body in &mut self.bodies {
            body.state = advance(body.state, &body.descriptor, delta);
        }
        self.recompose();

        if self.phase == ScenePhase::Idle {
            log::debug!("scene running, first timestamp {now}");
            self.phase = ScenePhase::Running;
        }
        self.last_delta = delta;
        self.frame_count += 1;

        self.frame()
    }

    /// The most recently composed frame, without advancing time.
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            delta: self.last_delta,
            backdrop: &self.backdrop_nodes,
            central: &self.central_node,
            bodies: &self.composed,
            selection: self.selection.current(),
        }
    }

    fn recompose(&mut self) {
        self.composed.clear();
        for body in &self.bodies {
            self.composed.push(compose(
                body.id,
                &body.descriptor,
                &body.state,
                &mut self.paths,
            ));
        }
    }

    /// Selects the body behind a picked node.
    ///
    /// Returns the new selection, or `None` if `id` is not in the table, in
    /// which case the current selection is left untouched.
    pub fn pick(&mut self, id: BodyId) -> Option<&SelectionSummary> {
        match self.bodies.get(id.index()) {
            Some(body) => Some(self.selection.select(&body.descriptor)),
            None => {
                log::debug!("pick for unknown body {id:?} ignored");
                None
            }
        }
    }

    /// Selects a body by its display name, ignoring ASCII case.
    pub fn pick_by_name(&mut self, name: &str) -> Option<&SelectionSummary> {
        match self.find_body(name) {
            Some(id) => self.pick(id),
            None => {
                log::debug!("pick for unknown body {name:?} ignored");
                None
            }
        }
    }

    /// Looks up a body by its display name, ignoring ASCII case.
    pub fn find_body(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .find(|body| display_name(&body.descriptor.texture_id).eq_ignore_ascii_case(name))
            .map(|body| body.id)
    }

    pub fn selection(&self) -> Option<&SelectionSummary> {
        self.selection.current()
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn descriptor(&self, id: BodyId) -> Option<&BodyDescriptor> {
        self.bodies.get(id.index()).map(|body| &body.descriptor)
    }

    pub fn state(&self, id: BodyId) -> Option<&BodyState> {
        self.bodies.get(id.index()).map(|body| &body.state)
    }
}
