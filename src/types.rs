use glam::Vec2;

/// Stable index of a shape in the world's insertion order.
///
/// Shapes are never removed, so a handle stays valid for the world's lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Shape discriminator used by dispatch and queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Disc,
    Rectangle,
    Polygon,
}

/// Centered world box every non-static shape is kept inside.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub half_extents: Vec2,
    /// Velocity scale applied when an axis is reflected.
    pub bounce: f32,
}

impl Bounds {
    pub const DEFAULT_BOUNCE: f32 = 0.8;

    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_extents: Vec2::new(half_width, half_height),
            bounce: Self::DEFAULT_BOUNCE,
        }
    }

    pub fn min(&self) -> Vec2 {
        -self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.half_extents
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= -self.half_extents.x
            && p.x <= self.half_extents.x
            && p.y >= -self.half_extents.y
            && p.y <= self.half_extents.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// How a contact pushes overlapping bodies apart after the impulse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Correction {
    /// Each non-static side moves `depth / 2` along the normal.
    HalfSplit,
    /// Self moves `(depth + slop) * other_mass / total`, other
    /// `(depth + slop) * self_mass / total`.
    MassRatio { slop: f32 },
    /// Each non-static side moves a fixed distance, regardless of depth.
    Fixed(f32),
}

/// Uniform contact manifold produced by every shape pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the resolving shape toward its partner.
    pub normal: Vec2,
    /// Penetration along `normal` (≥ 0 when overlapping).
    pub depth: f32,
    /// Representative contact point in world space.
    pub contact: Vec2,
    /// Multiplier on the restitution impulse.
    pub impulse_scale: f32,
    pub correction: Correction,
}

impl Contact {
    /// Same contact seen from the partner's side.
    pub fn flipped(self) -> Self {
        Self { normal: -self.normal, ..self }
    }
}

/// World-level configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Acceleration written by `apply_forces` each step.
    pub gravity: Vec2,
    /// Constant gravity each body adds again while integrating.
    pub body_gravity: Vec2,
    /// Linear drag scalar used by `apply_forces` (`-0.5 * drag * v / m`).
    pub drag: f32,
    pub bounds: Bounds,
    /// Scale rectangle-rectangle impulses by 0.8 on side hits and 1.2 otherwise.
    pub rect_impulse_bias: bool,
    /// Read by renderers through `World::velocity_vectors`; physics ignores it.
    pub show_velocity_vectors: bool,
    /// Enable internal timing instrumentation (adds small overhead when true).
    pub enable_timing: bool,
}

impl WorldConfig {
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_body_gravity(mut self, body_gravity: Vec2) -> Self {
        self.body_gravity = body_gravity;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_rect_impulse_bias(mut self, enabled: bool) -> Self {
        self.rect_impulse_bias = enabled;
        self
    }

    pub fn with_velocity_vectors(mut self, show: bool) -> Self {
        self.show_velocity_vectors = show;
        self
    }

    pub fn with_timing(mut self, enabled: bool) -> Self {
        self.enable_timing = enabled;
        self
    }

    /// No gravity, no drag anywhere. Handy for scripted scenes and tests.
    pub fn weightless() -> Self {
        Self::default()
            .with_gravity(Vec2::ZERO)
            .with_body_gravity(Vec2::ZERO)
            .with_drag(0.0)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            body_gravity: crate::body::Body::GRAVITY,
            drag: 0.01,
            bounds: Bounds::default(),
            rect_impulse_bias: true,
            show_velocity_vectors: false,
            enable_timing: false,
        }
    }
}

/// Debug counters for the last completed step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub bodies: usize,
    /// Unordered pairs visited (n*(n-1)/2).
    pub candidate_pairs: usize,
    /// Pairs rejected because both sides are static.
    pub static_pairs: usize,
    pub intersecting_pairs: usize,
    /// Contacts whose impulse was applied (approaching pairs only).
    pub resolved_contacts: usize,
    pub boundary_clamps: usize,
}

/// Timing breakdown for the last completed step.
#[derive(Copy, Clone, Debug, Default)]
pub struct StepTiming {
    pub step_ms: f64,
    pub forces_ms: f64,
    pub collisions_ms: f64,
    pub boundaries_ms: f64,
    pub integrate_ms: f64,
}
