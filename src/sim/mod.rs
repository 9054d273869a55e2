//! Ball physics
//!
//! Deliberately approximate: O(n²) pairwise circle collisions, hard
//! positional clamping at the bounds, and a speed threshold below which
//! bodies stop translating. No rotational coupling, no broad phase.

pub mod body;
pub mod collision;
pub mod state;
pub mod tick;

pub use body::{Body, BodyStyle};
pub use collision::{circles_overlap, collide, collide_pairs, overlapping, transfer_allowed};
pub use state::{PhysicsMode, SimContext, StackSpec};
pub use tick::step;
