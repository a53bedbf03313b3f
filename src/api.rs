use glam::Vec2;

use crate::body::Body;
use crate::error::Result;
use crate::shape::Shape;
use crate::types::*;

/// Public API contract for the stepping world.
pub trait PhysicsWorldApi {
    /// Construct an empty world with the given configuration.
    fn new(cfg: WorldConfig) -> Self
    where
        Self: Sized;

    /// Register a shape. It lives as long as the world.
    fn add(&mut self, shape: Shape) -> BodyHandle;

    // --- Stepping ----------------------------------------------------------

    /// One full step: forces, collisions, boundaries, integration.
    fn step(&mut self, dt: f32);

    /// Reset every dynamic body's acceleration to gravity plus linear drag.
    fn apply_forces(&mut self, dt: f32);

    /// All-pairs intersection and one resolution per intersecting pair.
    fn detect_and_resolve_collisions(&mut self);

    /// Clamp every dynamic shape into the world box, reflecting velocity.
    fn enforce_boundaries(&mut self);

    /// Integrate every body by `dt`.
    fn integrate(&mut self, dt: f32);

    // --- Queries -----------------------------------------------------------

    /// Read-only view of every shape in insertion order.
    fn shapes(&self) -> &[Shape];

    fn shape(&self, handle: BodyHandle) -> Option<&Shape>;

    fn shape_mut(&mut self, handle: BodyHandle) -> Option<&mut Shape>;

    /// Topmost shape containing `p`: discs first, then rectangles, then
    /// polygons, each in reverse insertion order.
    fn body_at(&self, p: Vec2) -> Option<BodyHandle>;

    /// `(position, velocity * scale)` per body when the world is configured to
    /// show velocity vectors; empty otherwise.
    fn velocity_vectors(&self) -> Vec<(Vec2, Vec2)>;

    // --- Interaction -------------------------------------------------------

    /// Launch a body along a drag gesture from `from` to `to`.
    fn launch(&mut self, handle: BodyHandle, from: Vec2, to: Vec2) -> Result<()>;
}

/// Capability set every shape variant provides.
pub trait ShapeApi {
    fn kind(&self) -> ShapeKind;

    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Overlap predicate against any other shape.
    fn intersects(&self, other: &Shape) -> bool;

    /// Contact manifold with `other`, normal pointing from `self` toward it.
    /// `None` when the pair does not overlap.
    fn contact(&self, other: &Shape) -> Option<Contact>;

    /// Push the shape back inside `bounds`. Returns true if anything moved.
    fn clamp_to_bounds(&mut self, bounds: &Bounds) -> bool;

    /// Outline in the body's local frame, for renderers.
    fn local_vertices(&self) -> Vec<Vec2>;

    /// Outline in world space.
    fn world_vertices(&self) -> Vec<Vec2>;

    fn contains_point(&self, p: Vec2) -> bool;
}

/// Narrowphase primitive signatures.
pub trait NarrowphaseApi {
    // Frames ----------------------------------------------------------------

    fn to_local(p: Vec2, center: Vec2, rotation: f32) -> Vec2;
    fn to_world(p: Vec2, center: Vec2, rotation: f32) -> Vec2;
    fn rect_vertices(center: Vec2, half: Vec2, rotation: f32) -> [Vec2; 4];

    // Closest points --------------------------------------------------------

    fn closest_point_on_rect(p: Vec2, center: Vec2, half: Vec2, rotation: f32) -> Vec2;
    fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2;

    // Overlaps --------------------------------------------------------------

    fn overlap_disc_disc(c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> bool;
    fn overlap_disc_rect(c: Vec2, r: f32, box_c: Vec2, box_h: Vec2, rotation: f32) -> bool;
    fn overlap_disc_polygon(c: Vec2, r: f32, verts: &[Vec2]) -> bool;

    /// Separating axis test over both outlines' edge normals.
    fn sat_overlap(a: &[Vec2], b: &[Vec2]) -> bool;

    /// Axis of minimum overlap (unoriented) and its depth, `None` if separated.
    fn sat_min_overlap(a: &[Vec2], b: &[Vec2]) -> Option<(Vec2, f32)>;

    // Points ----------------------------------------------------------------

    fn overlap_point_disc(p: Vec2, c: Vec2, r: f32) -> bool;
    fn overlap_point_rect(p: Vec2, c: Vec2, h: Vec2, rotation: f32) -> bool;
    fn overlap_point_polygon(p: Vec2, verts: &[Vec2]) -> bool;
}
