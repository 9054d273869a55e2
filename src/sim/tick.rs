//! Simulation step
//!
//! One step per frame with the frame's measured delta-time:
//! 1. pairwise collision pass (separation + impulse transfer)
//! 2. per-body confinement, forces and integration
//!
//! In scoring mode the whole arena is frozen and neither phase runs.

use super::collision::collide_pairs;
use super::state::{PhysicsMode, SimContext};

/// Advance the simulation by `dt` seconds. Returns the number of overlapping pairs.
pub fn step(ctx: &mut SimContext, dt: f32) -> usize {
    if ctx.mode == PhysicsMode::Scoring {
        return 0;
    }

    let hits = collide_pairs(&mut ctx.bodies);
    for body in &mut ctx.bodies {
        body.integrate(&ctx.bounds, dt);
    }
    hits
}
