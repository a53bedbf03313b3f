use glam::Vec2;

use crate::api::{NarrowphaseApi, ShapeApi};
use crate::body::Body;
use crate::error::ShapeError;
use crate::narrowphase::Narrowphase;
use crate::types::*;

/// Below this distance a contact normal is replaced by [`FALLBACK_NORMAL`].
pub const NORMAL_EPSILON: f32 = 1e-4;

/// Normal used when the two reference points coincide.
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

/// Extra separation added to rectangle-rectangle corrections to avoid sticking.
pub const RECT_SLOP: f32 = 0.001;

/// Distance each side of a polygon contact is pushed, whatever the depth.
pub const POLYGON_SEPARATION: f32 = 0.01;

/// Segments in a disc's exported outline.
pub const DISC_OUTLINE_SEGMENTS: usize = 32;

/// Rectangle-rectangle impulse scale for side hits (`|n.x| > threshold`) and for
/// everything else. Tuned for feel, not physics.
pub const RECT_SIDE_HIT_THRESHOLD: f32 = 0.8;
pub const RECT_SIDE_IMPULSE_SCALE: f32 = 0.8;
pub const RECT_OTHER_IMPULSE_SCALE: f32 = 1.2;

/// Default sizes for spawned shapes.
pub mod presets {
    use glam::Vec2;
    use std::f32::consts::TAU;

    pub const DISC_RADIUS: f32 = 0.1;
    pub const RECT_WIDTH: f32 = 0.2;
    pub const RECT_HEIGHT: f32 = 0.15;
    pub const POLYGON_SIZE: f32 = 0.1;

    /// `sides` points on a circle of radius `size`, counter-clockwise from +X.
    pub fn regular_vertices(sides: usize, size: f32) -> Vec<Vec2> {
        (0..sides)
            .map(|i| Vec2::from_angle(i as f32 * TAU / sides as f32) * size)
            .collect()
    }

    pub fn pentagon_vertices() -> Vec<Vec2> {
        regular_vertices(5, POLYGON_SIZE)
    }

    /// Isosceles triangle with its apex up.
    pub fn triangle_vertices(size: f32) -> Vec<Vec2> {
        vec![
            Vec2::new(-size, -size),
            Vec2::new(size, -size),
            Vec2::new(0.0, size),
        ]
    }
}

fn rect_impulse_scale(normal: Vec2) -> f32 {
    if normal.dot(Vec2::X).abs() > RECT_SIDE_HIT_THRESHOLD {
        RECT_SIDE_IMPULSE_SCALE
    } else {
        RECT_OTHER_IMPULSE_SCALE
    }
}

/// Unit vector from `from` to `to`, or the fallback when they coincide.
fn center_normal(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    let len = d.length();
    if len < NORMAL_EPSILON { FALLBACK_NORMAL } else { d / len }
}

/// Vertex of `verts` furthest along `dir`.
fn support(verts: &[Vec2], dir: Vec2) -> Vec2 {
    verts
        .iter()
        .copied()
        .max_by(|a, b| a.dot(dir).total_cmp(&b.dot(dir)))
        .unwrap_or(Vec2::ZERO)
}

/// Axis-aligned clamp of a box of half extents `half` centered on the body.
fn clamp_box(body: &mut Body, half: Vec2, bounds: &Bounds) -> bool {
    let (min, max) = (bounds.min(), bounds.max());
    let mut clamped = false;

    if body.position.x - half.x < min.x {
        body.position.x = min.x + half.x;
        body.velocity.x = -body.velocity.x * bounds.bounce;
        clamped = true;
    } else if body.position.x + half.x > max.x {
        body.position.x = max.x - half.x;
        body.velocity.x = -body.velocity.x * bounds.bounce;
        clamped = true;
    }

    if body.position.y - half.y < min.y {
        body.position.y = min.y + half.y;
        body.velocity.y = -body.velocity.y * bounds.bounce;
        clamped = true;
    } else if body.position.y + half.y > max.y {
        body.position.y = max.y - half.y;
        body.velocity.y = -body.velocity.y * bounds.bounce;
        clamped = true;
    }

    clamped
}

// --- Disc ----------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Disc {
    pub body: Body,
    pub radius: f32,
}

impl Disc {
    /// Unchecked constructor; `radius` and `mass` must be positive.
    pub fn new(position: Vec2, radius: f32, mass: f32) -> Self {
        Self { body: Body::new(position, mass), radius }
    }

    pub fn from_body(body: Body, radius: f32) -> Self {
        Self { body, radius }
    }

    pub fn try_new(body: Body, radius: f32) -> Result<Self, ShapeError> {
        let disc = Self { body, radius };
        disc.validate()?;
        Ok(disc)
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        self.body.validate()?;
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ShapeError::InvalidRadius(self.radius));
        }
        Ok(())
    }

    pub fn contact_disc(&self, other: &Disc) -> Option<Contact> {
        let (p0, p1) = (self.body.position, other.body.position);
        if !Narrowphase::overlap_disc_disc(p0, self.radius, p1, other.radius) {
            return None;
        }
        let delta = p1 - p0;
        let normal = delta.normalize_or_zero();
        Some(Contact {
            normal,
            depth: self.radius + other.radius - delta.length(),
            contact: p0 + normal * self.radius,
            impulse_scale: 1.0,
            correction: Correction::HalfSplit,
        })
    }

    pub fn contact_rect(&self, rect: &Rectangle) -> Option<Contact> {
        let center = self.body.position;
        if !Narrowphase::overlap_disc_rect(
            center,
            self.radius,
            rect.body.position,
            rect.half_extents(),
            rect.body.rotation,
        ) {
            return None;
        }
        let closest = Narrowphase::closest_point_on_rect(
            center,
            rect.body.position,
            rect.half_extents(),
            rect.body.rotation,
        );
        // Measured from the box surface out to the disc center.
        let outward = center - closest;
        let distance = outward.length();
        let outward = if distance < NORMAL_EPSILON {
            FALLBACK_NORMAL
        } else {
            outward / distance
        };
        Some(Contact {
            normal: -outward,
            depth: self.radius - distance,
            contact: closest,
            impulse_scale: 1.0,
            correction: Correction::MassRatio { slop: 0.0 },
        })
    }
}

impl ShapeApi for Disc {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Disc
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn intersects(&self, other: &Shape) -> bool {
        let c = self.body.position;
        match other {
            Shape::Disc(d) => Narrowphase::overlap_disc_disc(c, self.radius, d.body.position, d.radius),
            Shape::Rectangle(r) => Narrowphase::overlap_disc_rect(
                c,
                self.radius,
                r.body.position,
                r.half_extents(),
                r.body.rotation,
            ),
            Shape::Polygon(p) => Narrowphase::overlap_disc_polygon(c, self.radius, &p.world_vertices()),
        }
    }

    fn contact(&self, other: &Shape) -> Option<Contact> {
        match other {
            Shape::Disc(d) => self.contact_disc(d),
            Shape::Rectangle(r) => self.contact_rect(r),
            Shape::Polygon(p) => p.contact_disc(self).map(Contact::flipped),
        }
    }

    fn clamp_to_bounds(&mut self, bounds: &Bounds) -> bool {
        if self.body.is_static {
            return false;
        }
        clamp_box(&mut self.body, Vec2::splat(self.radius), bounds)
    }

    fn local_vertices(&self) -> Vec<Vec2> {
        presets::regular_vertices(DISC_OUTLINE_SEGMENTS, self.radius)
    }

    fn world_vertices(&self) -> Vec<Vec2> {
        let (p, rot) = (self.body.position, self.body.rotation);
        self.local_vertices()
            .into_iter()
            .map(|v| Narrowphase::to_world(v, p, rot))
            .collect()
    }

    fn contains_point(&self, p: Vec2) -> bool {
        Narrowphase::overlap_point_disc(p, self.body.position, self.radius)
    }
}

// --- Rectangle -----------------------------------------------------------

/// Box centered on its body; the body's rotation orients it.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub body: Body,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    /// Unchecked constructor; extents and `mass` must be positive.
    pub fn new(position: Vec2, width: f32, height: f32, mass: f32) -> Self {
        Self { body: Body::new(position, mass), width, height }
    }

    pub fn from_body(body: Body, width: f32, height: f32) -> Self {
        Self { body, width, height }
    }

    pub fn try_new(body: Body, width: f32, height: f32) -> Result<Self, ShapeError> {
        let rect = Self { body, width, height };
        rect.validate()?;
        Ok(rect)
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        self.body.validate()?;
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if !(ok(self.width) && ok(self.height)) {
            return Err(ShapeError::InvalidExtent { width: self.width, height: self.height });
        }
        Ok(())
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Half extents of the world-space bounding box of the rotated rectangle.
    pub fn bounding_half_extents(&self) -> Vec2 {
        let h = self.half_extents();
        let (s, c) = self.body.rotation.sin_cos();
        let (s, c) = (s.abs(), c.abs());
        Vec2::new(h.x * c + h.y * s, h.x * s + h.y * c)
    }

    pub fn vertices(&self) -> [Vec2; 4] {
        Narrowphase::rect_vertices(self.body.position, self.half_extents(), self.body.rotation)
    }

    /// Minimum-translation contact from SAT, oriented toward `other`.
    pub fn contact_rect(&self, other: &Rectangle) -> Option<Contact> {
        let a = self.vertices();
        let b = other.vertices();
        let (axis, depth) = Narrowphase::sat_min_overlap(&a, &b)?;
        let normal = if (other.body.position - self.body.position).dot(axis) < 0.0 {
            -axis
        } else {
            axis
        };
        Some(Contact {
            normal,
            depth,
            contact: support(&b, -normal),
            impulse_scale: rect_impulse_scale(normal),
            correction: Correction::MassRatio { slop: RECT_SLOP },
        })
    }
}

impl ShapeApi for Rectangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn intersects(&self, other: &Shape) -> bool {
        match other {
            Shape::Disc(d) => Narrowphase::overlap_disc_rect(
                d.body.position,
                d.radius,
                self.body.position,
                self.half_extents(),
                self.body.rotation,
            ),
            Shape::Rectangle(r) => Narrowphase::sat_overlap(&self.vertices(), &r.vertices()),
            Shape::Polygon(p) => Narrowphase::sat_overlap(&self.vertices(), &p.world_vertices()),
        }
    }

    fn contact(&self, other: &Shape) -> Option<Contact> {
        match other {
            Shape::Disc(d) => d.contact_rect(self).map(Contact::flipped),
            Shape::Rectangle(r) => self.contact_rect(r),
            Shape::Polygon(p) => p.contact_rect(self).map(Contact::flipped),
        }
    }

    fn clamp_to_bounds(&mut self, bounds: &Bounds) -> bool {
        if self.body.is_static {
            return false;
        }
        let half = self.bounding_half_extents();
        clamp_box(&mut self.body, half, bounds)
    }

    fn local_vertices(&self) -> Vec<Vec2> {
        Narrowphase::rect_vertices(Vec2::ZERO, self.half_extents(), 0.0).to_vec()
    }

    fn world_vertices(&self) -> Vec<Vec2> {
        self.vertices().to_vec()
    }

    fn contains_point(&self, p: Vec2) -> bool {
        Narrowphase::overlap_point_rect(p, self.body.position, self.half_extents(), self.body.rotation)
    }
}

// --- ConvexPolygon -------------------------------------------------------

/// Convex outline stored in local space; world vertices are rebuilt on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    pub body: Body,
    vertices: Vec<Vec2>,
}

impl ConvexPolygon {
    /// Unchecked constructor; needs ≥ 3 consistently wound vertices.
    pub fn new(position: Vec2, vertices: Vec<Vec2>, mass: f32) -> Self {
        Self { body: Body::new(position, mass), vertices }
    }

    pub fn from_body(body: Body, vertices: Vec<Vec2>) -> Self {
        Self { body, vertices }
    }

    pub fn try_new(body: Body, vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        let poly = Self { body, vertices };
        poly.validate()?;
        Ok(poly)
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        self.body.validate()?;
        let v = &self.vertices;
        let n = v.len();
        if n < 3 {
            return Err(ShapeError::TooFewVertices { count: n });
        }
        for i in 0..n {
            if (v[(i + 1) % n] - v[i]).length_squared() <= f32::EPSILON * f32::EPSILON {
                return Err(ShapeError::DegenerateEdge { index: i });
            }
        }
        Ok(())
    }

    /// Regular polygon with `sides` corners on a circle of radius `size`.
    pub fn regular(position: Vec2, sides: usize, size: f32, mass: f32) -> Self {
        Self::new(position, presets::regular_vertices(sides, size), mass)
    }

    pub fn pentagon(position: Vec2, mass: f32) -> Self {
        Self::new(position, presets::pentagon_vertices(), mass)
    }

    pub fn triangle(position: Vec2, size: f32, mass: f32) -> Self {
        Self::new(position, presets::triangle_vertices(size), mass)
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Contact against a disc. The normal runs center to center.
    pub fn contact_disc(&self, disc: &Disc) -> Option<Contact> {
        let verts = self.world_vertices();
        let c = disc.body.position;
        if !Narrowphase::overlap_disc_polygon(c, disc.radius, &verts) {
            return None;
        }
        let n = verts.len();
        let closest = (0..n)
            .map(|i| Narrowphase::closest_point_on_segment(verts[i], verts[(i + 1) % n], c))
            .min_by(|a, b| (c - *a).length_squared().total_cmp(&(c - *b).length_squared()))
            .unwrap_or(c);
        Some(Contact {
            normal: center_normal(self.body.position, c),
            depth: disc.radius - (c - closest).length(),
            contact: closest,
            impulse_scale: 1.0,
            correction: Correction::Fixed(POLYGON_SEPARATION),
        })
    }

    /// Contact against another convex outline (rectangle or polygon) found by SAT.
    ///
    /// Only the overlap test and depth come from SAT; the normal runs center to
    /// center like every other polygon contact.
    fn contact_outline(&self, other_center: Vec2, other: &[Vec2]) -> Option<Contact> {
        let (_, depth) = Narrowphase::sat_min_overlap(&self.world_vertices(), other)?;
        let normal = center_normal(self.body.position, other_center);
        Some(Contact {
            normal,
            depth,
            contact: support(other, -normal),
            impulse_scale: 1.0,
            correction: Correction::Fixed(POLYGON_SEPARATION),
        })
    }

    pub fn contact_rect(&self, rect: &Rectangle) -> Option<Contact> {
        self.contact_outline(rect.body.position, &rect.vertices())
    }

    pub fn contact_polygon(&self, other: &ConvexPolygon) -> Option<Contact> {
        self.contact_outline(other.body.position, &other.world_vertices())
    }
}

impl ShapeApi for ConvexPolygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn intersects(&self, other: &Shape) -> bool {
        let own = self.world_vertices();
        match other {
            Shape::Disc(d) => Narrowphase::overlap_disc_polygon(d.body.position, d.radius, &own),
            Shape::Rectangle(r) => Narrowphase::sat_overlap(&own, &r.vertices()),
            Shape::Polygon(p) => Narrowphase::sat_overlap(&own, &p.world_vertices()),
        }
    }

    fn contact(&self, other: &Shape) -> Option<Contact> {
        match other {
            Shape::Disc(d) => self.contact_disc(d),
            Shape::Rectangle(r) => self.contact_rect(r),
            Shape::Polygon(p) => self.contact_polygon(p),
        }
    }

    /// Push by the largest correction any vertex needs, once per axis.
    fn clamp_to_bounds(&mut self, bounds: &Bounds) -> bool {
        if self.body.is_static {
            return false;
        }
        let (min, max) = (bounds.min(), bounds.max());
        let mut adjust = Vec2::ZERO;
        let mut needs_adjust = false;

        for v in self.world_vertices() {
            if v.x < min.x {
                adjust.x = adjust.x.max(min.x - v.x);
                needs_adjust = true;
            } else if v.x > max.x {
                adjust.x = adjust.x.min(max.x - v.x);
                needs_adjust = true;
            }

            if v.y < min.y {
                adjust.y = adjust.y.max(min.y - v.y);
                needs_adjust = true;
            } else if v.y > max.y {
                adjust.y = adjust.y.min(max.y - v.y);
                needs_adjust = true;
            }
        }

        if !needs_adjust {
            return false;
        }
        self.body.position += adjust;
        if adjust.x != 0.0 {
            self.body.velocity.x = -self.body.velocity.x * bounds.bounce;
        }
        if adjust.y != 0.0 {
            self.body.velocity.y = -self.body.velocity.y * bounds.bounce;
        }
        true
    }

    fn local_vertices(&self) -> Vec<Vec2> {
        self.vertices.clone()
    }

    fn world_vertices(&self) -> Vec<Vec2> {
        let (p, rot) = (self.body.position, self.body.rotation);
        self.vertices
            .iter()
            .map(|&v| Narrowphase::to_world(v, p, rot))
            .collect()
    }

    fn contains_point(&self, p: Vec2) -> bool {
        Narrowphase::overlap_point_polygon(p, &self.world_vertices())
    }
}

// --- Shape ---------------------------------------------------------------

/// Tagged union over the supported shape variants.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Disc(Disc),
    Rectangle(Rectangle),
    Polygon(ConvexPolygon),
}

impl Shape {
    /// Convenience: unchecked disc.
    pub fn disc(position: Vec2, radius: f32, mass: f32) -> Self {
        Shape::Disc(Disc::new(position, radius, mass))
    }

    /// Convenience: unchecked rectangle.
    pub fn rectangle(position: Vec2, width: f32, height: f32, mass: f32) -> Self {
        Shape::Rectangle(Rectangle::new(position, width, height, mass))
    }

    /// Convenience: unchecked convex polygon.
    pub fn polygon(position: Vec2, vertices: Vec<Vec2>, mass: f32) -> Self {
        Shape::Polygon(ConvexPolygon::new(position, vertices, mass))
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Shape::Disc(d) => d.validate(),
            Shape::Rectangle(r) => r.validate(),
            Shape::Polygon(p) => p.validate(),
        }
    }

    fn inner(&self) -> &dyn ShapeApi {
        match self {
            Shape::Disc(d) => d,
            Shape::Rectangle(r) => r,
            Shape::Polygon(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeApi {
        match self {
            Shape::Disc(d) => d,
            Shape::Rectangle(r) => r,
            Shape::Polygon(p) => p,
        }
    }

    /// Velocity marker a renderer can draw from the body's position.
    pub fn velocity_vector(&self, scale: f32) -> Vec2 {
        self.body().velocity * scale
    }
}

impl ShapeApi for Shape {
    fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    fn body(&self) -> &Body {
        self.inner().body()
    }

    fn body_mut(&mut self) -> &mut Body {
        self.inner_mut().body_mut()
    }

    fn intersects(&self, other: &Shape) -> bool {
        self.inner().intersects(other)
    }

    fn contact(&self, other: &Shape) -> Option<Contact> {
        self.inner().contact(other)
    }

    fn clamp_to_bounds(&mut self, bounds: &Bounds) -> bool {
        self.inner_mut().clamp_to_bounds(bounds)
    }

    fn local_vertices(&self) -> Vec<Vec2> {
        self.inner().local_vertices()
    }

    fn world_vertices(&self) -> Vec<Vec2> {
        self.inner().world_vertices()
    }

    fn contains_point(&self, p: Vec2) -> bool {
        self.inner().contains_point(p)
    }
}

impl From<Disc> for Shape {
    fn from(d: Disc) -> Self {
        Shape::Disc(d)
    }
}

impl From<Rectangle> for Shape {
    fn from(r: Rectangle) -> Self {
        Shape::Rectangle(r)
    }
}

impl From<ConvexPolygon> for Shape {
    fn from(p: ConvexPolygon) -> Self {
        Shape::Polygon(p)
    }
}
