use glam::Vec2;

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::api::{PhysicsWorldApi, ShapeApi};
use crate::error::{Result, WorldError};
use crate::resolve::resolve_pair;
use crate::shape::Shape;
use crate::types::*;

/// Scale applied to velocities exported by `velocity_vectors`.
pub const VELOCITY_VECTOR_SCALE: f32 = 0.1;

/// Launch speed per world unit of drag distance.
pub const LAUNCH_GAIN: f32 = 5.0;

/// Stepping world: owns every shape for its whole lifetime.
pub struct PhysicsWorld {
    pub cfg: WorldConfig,
    pub step_counter: u64,

    // Insertion order is significant: it drives pair order and query priority.
    shapes: Vec<Shape>,

    last_stats: StepStats,
    last_timing: Option<StepTiming>,
}

/// Two distinct mutable elements, `i < j`.
fn pair_mut(shapes: &mut [Shape], i: usize, j: usize) -> (&mut Shape, &mut Shape) {
    debug_assert!(i < j);
    let (head, tail) = shapes.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

fn elapsed_ms(t: Option<Instant>) -> f64 {
    t.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0)
}

impl PhysicsWorldApi for PhysicsWorld {
    fn new(cfg: WorldConfig) -> Self {
        Self {
            cfg,
            step_counter: 0,
            shapes: Vec::new(),
            last_stats: StepStats::default(),
            last_timing: None,
        }
    }

    fn add(&mut self, shape: Shape) -> BodyHandle {
        let handle = BodyHandle(self.shapes.len() as u32);
        if let Err(err) = shape.validate() {
            warn!(?handle, %err, "registering shape that breaks collision preconditions");
        }
        debug!(?handle, kind = ?shape.kind(), position = ?shape.body().position, "body registered");
        self.shapes.push(shape);
        handle
    }

    fn step(&mut self, dt: f32) {
        let timed = self.cfg.enable_timing;
        let now = || if timed { Some(Instant::now()) } else { None };

        let t_all = now();
        let t0 = now();
        self.apply_forces(dt);
        let forces_ms = elapsed_ms(t0);

        let t1 = now();
        self.detect_and_resolve_collisions();
        let collisions_ms = elapsed_ms(t1);

        let t2 = now();
        self.enforce_boundaries();
        let boundaries_ms = elapsed_ms(t2);

        let t3 = now();
        self.integrate(dt);
        let integrate_ms = elapsed_ms(t3);

        self.step_counter = self.step_counter.wrapping_add(1);
        self.last_timing = t_all.map(|t| StepTiming {
            step_ms: elapsed_ms(Some(t)),
            forces_ms,
            collisions_ms,
            boundaries_ms,
            integrate_ms,
        });
    }

    fn apply_forces(&mut self, _dt: f32) {
        let (gravity, drag) = (self.cfg.gravity, self.cfg.drag);
        for shape in &mut self.shapes {
            let body = shape.body_mut();
            if body.is_static {
                continue;
            }
            let drag_force = -drag * 0.5 * body.velocity;
            body.acceleration = gravity + drag_force / body.mass;
        }
    }

    fn detect_and_resolve_collisions(&mut self) {
        let n = self.shapes.len();
        let stats = &mut self.last_stats;
        stats.bodies = n;
        stats.candidate_pairs = 0;
        stats.static_pairs = 0;
        stats.intersecting_pairs = 0;
        stats.resolved_contacts = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                stats.candidate_pairs += 1;
                let (a, b) = pair_mut(&mut self.shapes, i, j);
                if a.body().is_static && b.body().is_static {
                    stats.static_pairs += 1;
                    continue;
                }
                if !(a.intersects(b) || b.intersects(a)) {
                    continue;
                }
                stats.intersecting_pairs += 1;
                if resolve_pair(a, b, self.cfg.rect_impulse_bias).is_some() {
                    stats.resolved_contacts += 1;
                }
            }
        }
    }

    fn enforce_boundaries(&mut self) {
        let bounds = self.cfg.bounds;
        let mut clamps = 0;
        for (i, shape) in self.shapes.iter_mut().enumerate() {
            if shape.body().is_static {
                continue;
            }
            if shape.clamp_to_bounds(&bounds) {
                clamps += 1;
                trace!(index = i, position = ?shape.body().position, "clamped to bounds");
            }
        }
        self.last_stats.boundary_clamps = clamps;
    }

    fn integrate(&mut self, dt: f32) {
        let gravity = self.cfg.body_gravity;
        for shape in &mut self.shapes {
            shape.body_mut().integrate_with(dt, gravity);
        }
    }

    fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    fn shape(&self, handle: BodyHandle) -> Option<&Shape> {
        self.shapes.get(handle.index())
    }

    fn shape_mut(&mut self, handle: BodyHandle) -> Option<&mut Shape> {
        self.shapes.get_mut(handle.index())
    }

    fn body_at(&self, p: Vec2) -> Option<BodyHandle> {
        [ShapeKind::Disc, ShapeKind::Rectangle, ShapeKind::Polygon]
            .into_iter()
            .find_map(|kind| {
                self.shapes
                    .iter()
                    .enumerate()
                    .rev()
                    .find(|(_, s)| s.kind() == kind && s.contains_point(p))
                    .map(|(i, _)| BodyHandle(i as u32))
            })
    }

    fn velocity_vectors(&self) -> Vec<(Vec2, Vec2)> {
        if !self.cfg.show_velocity_vectors {
            return Vec::new();
        }
        self.shapes
            .iter()
            .map(|s| (s.body().position, s.velocity_vector(VELOCITY_VECTOR_SCALE)))
            .collect()
    }

    fn launch(&mut self, handle: BodyHandle, from: Vec2, to: Vec2) -> Result<()> {
        let count = self.shapes.len();
        let shape = self
            .shapes
            .get_mut(handle.index())
            .ok_or(WorldError::UnknownHandle { handle, count })?;
        let body = shape.body_mut();
        if body.is_static {
            debug!(?handle, "launch ignored for static body");
            return Ok(());
        }
        body.velocity = (to - from) * LAUNCH_GAIN;
        debug!(?handle, velocity = ?body.velocity, "body launched");
        Ok(())
    }
}

impl PhysicsWorld {
    /// Register a shape only if it satisfies the collision preconditions.
    pub fn try_add(&mut self, shape: Shape) -> Result<BodyHandle> {
        shape.validate()?;
        Ok(self.add(shape))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Counters from the last collision and boundary passes.
    pub fn debug_stats(&self) -> StepStats {
        self.last_stats
    }

    /// Timing breakdown for the last `step` (only with `enable_timing`).
    pub fn timing(&self) -> Option<StepTiming> {
        self.last_timing
    }
}
