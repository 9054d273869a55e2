//! Circle-circle collision detection and response
//!
//! Response is deliberately approximate: overlapping bodies are pushed apart
//! by the penetration depth, and each may absorb a share of the other's speed.
//! The transfer is sign-gated and asymmetric, so momentum is not conserved.

use glam::Vec2;

use super::body::Body;
use crate::consts::IMPULSE_TRANSFER;
use crate::geom::normalized;

/// Whether two circles overlap or touch
#[inline]
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    a.pos.distance(b.pos) <= a.radius + b.radius
}

/// Sign of `x` as -1, 0 or 1 (zero maps to zero, unlike `f32::signum`)
#[inline]
fn sign(x: f32) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether pushing along `resolution` does not oppose `velocity` on either axis.
///
/// An axis where the velocity is zero is treated as compatible.
#[inline]
pub fn transfer_allowed(velocity: Vec2, resolution: Vec2) -> bool {
    let axis_ok = |v: f32, r: f32| v == 0.0 || sign(v) == sign(r);
    axis_ok(velocity.x, resolution.x) && axis_ok(velocity.y, resolution.y)
}

/// Test one pair and, on overlap, store separation vectors and transfer speed.
///
/// `a` receives the unit vector from `b` to `a` scaled by the penetration
/// depth; `b` receives its negation. Returns whether the pair overlapped.
pub fn collide(a: &mut Body, b: &mut Body) -> bool {
    let distance = a.pos.distance(b.pos);
    let reach = a.radius + b.radius;
    if distance > reach {
        return false;
    }

    let separation = normalized(a.pos - b.pos) * (reach - distance);
    a.resolution = separation;
    b.resolution = -separation;

    // Sequential on purpose: b's check sees a's updated velocity
    if transfer_allowed(b.vel, a.resolution) {
        a.apply_force(b.vel.length() * IMPULSE_TRANSFER, a.resolution);
    }
    if transfer_allowed(a.vel, b.resolution) {
        b.apply_force(a.vel.length() * IMPULSE_TRANSFER, b.resolution);
    }
    true
}

/// Run `collide` over every unordered pair `(i, j)`, `i < j`, in index order.
///
/// Later pairs overwrite earlier resolution vectors. Returns the overlap count.
pub fn collide_pairs(bodies: &mut [Body]) -> usize {
    let mut hits = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if collide(a, b) {
                hits += 1;
            }
        }
    }
    hits
}

/// Indices of every body overlapping `disc` (pure test, nothing is mutated)
pub fn overlapping(disc: &Body, bodies: &[Body]) -> Vec<usize> {
    bodies
        .iter()
        .enumerate()
        .filter(|(_, body)| circles_overlap(disc, body))
        .map(|(i, _)| i)
        .collect()
}
