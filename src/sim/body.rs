//! Circular physics bodies
//!
//! A body is a ball with a position, velocity and radius. Mass is modelled
//! as proportional to radius: every force is divided by `radius / 10`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::*;
use crate::geom::{Bounds, normalized};

/// How a body is painted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyStyle {
    pub fill: Rgb,
    pub text: Rgb,
    /// Outline only (the collector) instead of a filled disc
    pub outline: bool,
    pub visible: bool,
    /// Replaces the numeric label when drawn
    pub caption: Option<String>,
}

impl Default for BodyStyle {
    fn default() -> Self {
        Self {
            fill: Rgb::BLACK,
            text: Rgb::WHITE,
            outline: false,
            visible: true,
            caption: None,
        }
    }
}

/// A ball participating in the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cosmetic only, never affects collisions
    pub rotation: f32,
    pub angular_vel: f32,
    /// Pending positional correction for the current step (zeroed after integration)
    pub resolution: Vec2,
    pub gravity_scale: f32,
    /// Score value carried by the ball
    pub label: i32,
    pub style: BodyStyle,
}

impl Body {
    pub fn new(pos: Vec2, radius: f32, label: i32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
            angular_vel: 0.0,
            resolution: Vec2::ZERO,
            gravity_scale: 1.0,
            label,
            style: BodyStyle::default(),
        }
    }

    /// Text drawn on the ball
    pub fn caption(&self) -> String {
        match &self.style.caption {
            Some(caption) => caption.clone(),
            None => self.label.to_string(),
        }
    }

    /// Push the body along `direction`; heavier (larger) bodies accelerate less.
    ///
    /// A zero direction yields no change.
    #[inline]
    pub fn apply_force(&mut self, force: f32, direction: Vec2) {
        self.vel += normalized(direction) * (force / (self.radius / UNIT_MASS_RADIUS));
    }

    /// Set the resolution vector so an edge past a bound lands exactly on it
    pub fn confine(&mut self, bounds: &Bounds) {
        if self.pos.x - self.radius <= bounds.min_x {
            self.resolution.x = bounds.min_x - (self.pos.x - self.radius);
        } else if self.pos.x + self.radius >= bounds.max_x {
            self.resolution.x = bounds.max_x - (self.pos.x + self.radius);
        }
        if self.pos.y - self.radius <= bounds.min_y {
            self.resolution.y = bounds.min_y - (self.pos.y - self.radius);
        } else if self.pos.y + self.radius >= bounds.max_y {
            self.resolution.y = bounds.max_y - (self.pos.y + self.radius);
        }
    }

    /// Move by velocity, unless the body is slow enough to count as settled
    #[inline]
    fn drift(&mut self, dt: f32) {
        if self.vel.length() > SETTLE_SPEED {
            self.pos += self.vel * dt;
        }
    }

    /// Advance this body by one step, independent of every other body
    pub fn integrate(&mut self, bounds: &Bounds, dt: f32) {
        self.confine(bounds);

        self.apply_force(GRAVITY_FORCE * self.gravity_scale, Vec2::Y);
        self.apply_force(self.vel.length() * CORRECTIVE_FACTOR, self.resolution);
        self.apply_force(-DRAG_FORCE, self.vel);

        self.pos += self.resolution;
        self.drift(dt);

        self.rotation += self.angular_vel * dt;
        self.resolution = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_bounds() -> Bounds {
        Bounds::from_viewport(Vec2::new(10_000.0, 10_000.0))
    }

    #[test]
    fn test_force_scales_inversely_with_radius() {
        let mut small = Body::new(Vec2::ZERO, 10.0, 1);
        let mut large = Body::new(Vec2::ZERO, 20.0, 1);
        small.apply_force(30.0, Vec2::X);
        large.apply_force(30.0, Vec2::X);
        assert_eq!(small.vel, Vec2::new(30.0, 0.0));
        assert_eq!(large.vel.x * 2.0, small.vel.x);
    }

    #[test]
    fn test_zero_direction_applies_nothing() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 1);
        body.vel = Vec2::new(3.0, 4.0);
        body.apply_force(1000.0, Vec2::ZERO);
        assert_eq!(body.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_left_overshoot_restored_to_touch() {
        let bounds = wide_bounds();
        let mut body = Body::new(Vec2::new(9.0, 500.0), 10.0, 1);
        body.integrate(&bounds, 1.0 / 60.0);
        assert_eq!(body.pos.x - body.radius, bounds.min_x);
        assert_eq!(body.resolution, Vec2::ZERO);
    }

    #[test]
    fn test_bottom_overshoot_restored_to_touch() {
        let bounds = Bounds::from_viewport(Vec2::new(800.0, 600.0));
        let mut body = Body::new(Vec2::new(400.0, 591.0), 10.0, 1);
        body.integrate(&bounds, 1.0 / 60.0);
        assert_eq!(body.pos.y + body.radius, bounds.max_y);
    }

    #[test]
    fn test_right_overshoot_restored_to_touch() {
        let bounds = Bounds::from_viewport(Vec2::new(800.0, 600.0));
        let mut body = Body::new(Vec2::new(791.0, 300.0), 10.0, 1);
        body.integrate(&bounds, 1.0 / 60.0);
        assert_eq!(body.pos.x + body.radius, bounds.max_x);
        // Pushed back inward
        assert!(body.vel.x < 0.0);
    }

    #[test]
    fn test_top_overshoot_restored_to_touch() {
        let bounds = Bounds::from_viewport(Vec2::new(800.0, 600.0));
        let mut body = Body::new(Vec2::new(400.0, 9.0), 10.0, 1);
        body.integrate(&bounds, 1.0 / 60.0);
        assert_eq!(body.pos.y - body.radius, bounds.min_y);
    }

    #[test]
    fn test_settle_threshold_is_strict() {
        let start = Vec2::new(500.0, 500.0);

        let mut at_threshold = Body::new(start, 10.0, 1);
        at_threshold.vel = Vec2::new(30.0, 40.0);
        at_threshold.drift(1.0);
        assert_eq!(at_threshold.pos, start);

        let mut above = Body::new(start, 10.0, 1);
        above.vel = Vec2::new(50.0001, 0.0);
        above.drift(1.0);
        assert!(above.pos.x > start.x);
    }

    #[test]
    fn test_slow_body_does_not_drift_during_integration() {
        let bounds = wide_bounds();
        let start = Vec2::new(5000.0, 5000.0);
        let mut body = Body::new(start, 10.0, 1);
        body.vel = Vec2::new(20.0, 0.0);
        body.integrate(&bounds, 1.0);
        assert_eq!(body.pos, start);
        assert!(body.vel.length() < SETTLE_SPEED);
    }

    #[test]
    fn test_rotation_is_cosmetic() {
        let bounds = wide_bounds();
        let mut body = Body::new(Vec2::new(500.0, 500.0), 10.0, 1);
        body.angular_vel = 2.0;
        body.integrate(&bounds, 0.5);
        assert_eq!(body.rotation, 1.0);
    }

    #[test]
    fn test_caption_override() {
        let mut body = Body::new(Vec2::ZERO, 10.0, 7);
        assert_eq!(body.caption(), "7");
        body.style.caption = Some("+7".into());
        assert_eq!(body.caption(), "+7");
    }
}
