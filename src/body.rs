use glam::Vec2;

use crate::error::ShapeError;

/// Motion and material state shared by every shape variant.
///
/// A static body is never moved by forces, impulses, integration or
/// positional correction, but still takes part in collisions as an obstacle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Per-step force accumulator (divided by mass); cleared by `integrate`.
    pub acceleration: Vec2,
    /// Radians per second.
    pub angular_velocity: f32,
    /// Radians, counter-clockwise.
    pub rotation: f32,
    pub mass: f32,
    /// Bounciness in [0, 1].
    pub restitution: f32,
    /// Reserved; collision response does not read it.
    pub friction: f32,
    /// Quadratic air drag applied inside `integrate`.
    pub drag_coefficient: f32,
    pub is_static: bool,
}

impl Body {
    /// Constant gravity added by `integrate`, on top of the world's own gravity.
    pub const GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

    pub const DEFAULT_RESTITUTION: f32 = 0.8;
    pub const DEFAULT_FRICTION: f32 = 0.3;
    pub const DEFAULT_DRAG_COEFFICIENT: f32 = 0.1;

    /// Dynamic body at rest. `mass` must be positive; see [`Body::validate`].
    pub fn new(position: Vec2, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            angular_velocity: 0.0,
            rotation: 0.0,
            mass,
            restitution: Self::DEFAULT_RESTITUTION,
            friction: Self::DEFAULT_FRICTION,
            drag_coefficient: Self::DEFAULT_DRAG_COEFFICIENT,
            is_static: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_drag_coefficient(mut self, drag_coefficient: f32) -> Self {
        self.drag_coefficient = drag_coefficient;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Check the invariants the collision math relies on.
    ///
    /// Static bodies still need a positive mass: their mass enters the
    /// impulse denominator of every pair they take part in.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ShapeError::InvalidMass(self.mass));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ShapeError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }

    pub fn apply_force(&mut self, force: Vec2) {
        if !self.is_static {
            self.acceleration += force / self.mass;
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if !self.is_static {
            self.velocity += impulse / self.mass;
        }
    }

    pub fn apply_torque(&mut self, torque: f32) {
        if !self.is_static {
            self.angular_velocity += torque / self.mass;
        }
    }

    /// Move by `delta` unless static. Used for positional correction.
    pub fn translate(&mut self, delta: Vec2) {
        if !self.is_static {
            self.position += delta;
        }
    }

    /// Semi-implicit Euler step with [`Body::GRAVITY`].
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_with(dt, Self::GRAVITY);
    }

    /// Semi-implicit Euler step with a caller-supplied constant gravity.
    ///
    /// Accumulated acceleration is consumed: forces last exactly one step.
    pub fn integrate_with(&mut self, dt: f32, gravity: Vec2) {
        if self.is_static {
            return;
        }

        self.acceleration += gravity;

        let drag = -self.drag_coefficient * self.velocity * self.velocity.length();
        self.apply_force(drag);

        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;

        self.acceleration = Vec2::ZERO;
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_static_body_ignores_everything() {
        let mut b = Body::new(Vec2::new(1.0, 2.0), 1.0)
            .with_velocity(Vec2::new(3.0, 0.0))
            .with_static(true);
        b.apply_force(Vec2::new(10.0, 0.0));
        b.apply_impulse(Vec2::new(10.0, 0.0));
        b.apply_torque(5.0);
        b.translate(Vec2::ONE);
        b.integrate(0.1);
        assert_eq!(b.position, Vec2::new(1.0, 2.0));
        assert_eq!(b.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(b.acceleration, Vec2::ZERO);
        assert_eq!(b.angular_velocity, 0.0);
    }

    #[test]
    fn test_impulse_and_force_scale_by_mass() {
        let mut b = Body::new(Vec2::ZERO, 2.0);
        b.apply_impulse(Vec2::new(4.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(2.0, 0.0));
        b.apply_force(Vec2::new(0.0, 6.0));
        assert_eq!(b.acceleration, Vec2::new(0.0, 3.0));
        b.apply_torque(1.0);
        assert_eq!(b.angular_velocity, 0.5);
    }

    #[test]
    fn test_integrate_order_and_reset() {
        let mut b = Body::new(Vec2::ZERO, 1.0)
            .with_drag_coefficient(0.0)
            .with_angular_velocity(2.0);
        b.apply_force(Vec2::new(1.0, 0.0));
        b.integrate(0.5);
        // v = (1, -9.81) * 0.5, x = v * 0.5
        assert_relative_eq!(b.velocity.x, 0.5);
        assert_relative_eq!(b.velocity.y, -4.905, epsilon = 1e-6);
        assert_relative_eq!(b.position.x, 0.25);
        assert_relative_eq!(b.position.y, -2.4525, epsilon = 1e-6);
        assert_relative_eq!(b.rotation, 1.0);
        assert_eq!(b.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_quadratic_drag_opposes_motion() {
        let mut b = Body::new(Vec2::ZERO, 1.0)
            .with_velocity(Vec2::new(2.0, 0.0))
            .with_drag_coefficient(0.1);
        b.integrate_with(0.1, Vec2::ZERO);
        // drag = -0.1 * 2 * 2 = -0.4 -> v = 2 - 0.04
        assert_relative_eq!(b.velocity.x, 1.96, epsilon = 1e-6);
        assert_eq!(b.velocity.y, 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Body::new(Vec2::ZERO, 1.0).validate().is_ok());
        assert_eq!(
            Body::new(Vec2::ZERO, 0.0).validate(),
            Err(ShapeError::InvalidMass(0.0))
        );
        assert_eq!(
            Body::new(Vec2::ZERO, 1.0).with_restitution(1.5).validate(),
            Err(ShapeError::InvalidRestitution(1.5))
        );
    }
}
