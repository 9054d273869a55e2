//! Simulation context
//!
//! Everything the physics step reads or writes lives here: the body pool,
//! the confinement bounds, the physics mode and the scoring collector.
//! Nothing is process-global; the frame driver owns one context per session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::collision::{collide, overlapping};
use crate::color::Rgb;
use crate::consts::COLLECTOR_RADIUS;
use crate::geom::Bounds;

/// Whether the arena is simulated or frozen for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhysicsMode {
    /// Pairwise collisions and integration run every step
    #[default]
    Active,
    /// The arena is frozen while the collector tallies overlapping balls
    Scoring,
}

/// Layout of the opening ball stack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackSpec {
    /// Number of rows; row `i` holds `rows - i` balls labelled `i + 1`
    pub rows: u32,
    /// Top-left of the first row
    pub origin: Vec2,
    /// Horizontal spacing between balls (and between row offsets)
    pub spacing: f32,
    /// Radius of row 0
    pub base_radius: f32,
    /// Radius added per row
    pub radius_step: f32,
    /// Sideways kick applied to every ball when the session starts
    pub launch_force: f32,
    /// Maximum cosmetic spin (radians/sec), sampled uniformly in `[-spin, spin]`
    pub spin: f32,
}

impl Default for StackSpec {
    fn default() -> Self {
        Self {
            rows: 9,
            origin: Vec2::new(0.0, 300.0),
            spacing: 10.0,
            base_radius: 10.0,
            radius_step: 1.5,
            launch_force: 1.0e9,
            spin: 0.5,
        }
    }
}

/// Complete physics state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimContext {
    pub bounds: Bounds,
    pub mode: PhysicsMode,
    /// Fixed-size pool; bodies are never removed during a session
    pub bodies: Vec<Body>,
    /// Scoring disc; drawn but never integrated
    pub collector: Body,
}

impl SimContext {
    /// Create an empty context confined to the initial viewport
    pub fn new(viewport: Vec2) -> Self {
        let mut collector = Body::new(Vec2::ZERO, COLLECTOR_RADIUS, 0);
        collector.style.outline = true;
        collector.style.text = Rgb::BLUE;
        collector.style.visible = false;
        collector.style.caption = Some("0".to_string());

        Self {
            bounds: Bounds::from_viewport(viewport),
            mode: PhysicsMode::Active,
            bodies: Vec::new(),
            collector,
        }
    }

    /// Re-derive the confinement rectangle from the current viewport
    pub fn refresh_bounds(&mut self, viewport: Vec2) {
        self.bounds.max_x = viewport.x;
        self.bounds.max_y = viewport.y;
    }

    /// Spawn a triangular stack of labelled balls and kick them sideways
    pub fn spawn_stack(&mut self, spec: &StackSpec, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        for i in 0..spec.rows {
            for j in 0..spec.rows - i {
                let pos = spec.origin + Vec2::new((i + j) as f32 * spec.spacing, 0.0);
                let radius = spec.base_radius + i as f32 * spec.radius_step;
                let mut body = Body::new(pos, radius, i as i32 + 1);
                body.angular_vel = rng.random_range(-spec.spin..=spec.spin);
                body.apply_force(spec.launch_force, Vec2::X);
                self.bodies.push(body);
            }
        }
        log::debug!("Spawned {} bodies in {} rows", self.bodies.len(), spec.rows);
    }

    pub fn set_mode(&mut self, mode: PhysicsMode) {
        if self.mode != mode {
            log::debug!("Physics mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Apply the same gravity factor to every pooled body
    pub fn set_gravity_scale(&mut self, scale: f32) {
        for body in &mut self.bodies {
            body.gravity_scale = scale;
        }
    }

    /// Apply the same force to every pooled body
    pub fn push_all(&mut self, force: f32, direction: Vec2) {
        for body in &mut self.bodies {
            body.apply_force(force, direction);
        }
    }

    /// Collide the collector with every pooled body it overlaps and return
    /// their indices.
    ///
    /// Works in any physics mode. Touched bodies keep their push-out vector
    /// until the next integration; the collector itself never moves.
    pub fn collect(&mut self) -> Vec<usize> {
        let hits = overlapping(&self.collector, &self.bodies);
        for &i in &hits {
            collide(&mut self.collector, &mut self.bodies[i]);
        }
        self.collector.resolution = Vec2::ZERO;
        self.collector.vel = Vec2::ZERO;
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_is_triangular() {
        let mut ctx = SimContext::new(Vec2::new(800.0, 600.0));
        ctx.spawn_stack(&StackSpec::default(), 7);
        assert_eq!(ctx.bodies.len(), 45);
        // Row 0 holds 9 balls labelled 1, the last row a single ball labelled 9
        assert_eq!(ctx.bodies.iter().filter(|b| b.label == 1).count(), 9);
        assert_eq!(ctx.bodies.last().map(|b| b.label), Some(9));
        assert_eq!(ctx.bodies[9].radius, 11.5);
    }

    #[test]
    fn test_stack_is_deterministic_per_seed() {
        let spec = StackSpec::default();
        let mut a = SimContext::new(Vec2::new(800.0, 600.0));
        let mut b = SimContext::new(Vec2::new(800.0, 600.0));
        a.spawn_stack(&spec, 42);
        b.spawn_stack(&spec, 42);
        let spins = |ctx: &SimContext| ctx.bodies.iter().map(|b| b.angular_vel).collect::<Vec<_>>();
        assert_eq!(spins(&a), spins(&b));
        assert!(spins(&a).iter().all(|s| s.abs() <= spec.spin));
    }

    #[test]
    fn test_refresh_bounds_tracks_viewport() {
        let mut ctx = SimContext::new(Vec2::new(800.0, 600.0));
        ctx.refresh_bounds(Vec2::new(1024.0, 768.0));
        assert_eq!(ctx.bounds.max_x, 1024.0);
        assert_eq!(ctx.bounds.max_y, 768.0);
        assert_eq!(ctx.bounds.min_x, 0.0);
    }

    #[test]
    fn test_collect_ignores_mode() {
        let mut ctx = SimContext::new(Vec2::new(800.0, 600.0));
        ctx.collector.pos = Vec2::new(400.0, 400.0);
        ctx.bodies.push(Body::new(Vec2::new(420.0, 400.0), 10.0, 3));
        ctx.bodies.push(Body::new(Vec2::new(100.0, 100.0), 10.0, 4));
        ctx.set_mode(PhysicsMode::Scoring);
        assert_eq!(ctx.collect(), vec![0]);
    }

    #[test]
    fn test_collect_pushes_touching_balls_out() {
        let mut ctx = SimContext::new(Vec2::new(800.0, 600.0));
        ctx.collector.pos = Vec2::new(400.0, 400.0);
        ctx.collector.radius = 50.0;
        ctx.bodies.push(Body::new(Vec2::new(420.0, 400.0), 10.0, 3));
        ctx.bodies.push(Body::new(Vec2::new(100.0, 100.0), 10.0, 4));
        ctx.collect();
        // Penetration 60 - 20, directed away from the collector
        assert_eq!(ctx.bodies[0].resolution, Vec2::new(40.0, 0.0));
        assert_eq!(ctx.bodies[1].resolution, Vec2::ZERO);
        assert_eq!(ctx.collector.resolution, Vec2::ZERO);
        assert_eq!(ctx.collector.vel, Vec2::ZERO);
    }
}
