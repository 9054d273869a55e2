//! 2D geometry primitives
//!
//! Vectors are `glam::Vec2` values; every operation returns a new value.
//! This module adds the pieces glam does not have: an inclusive
//! axis-aligned rectangle for hit-testing and the simulation bounds.

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Unit vector in the direction of `v`, or zero when `v` has zero length
#[inline]
pub fn normalized(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Axis-aligned rectangle (origin at the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Point test inclusive of all four edges
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.x
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }
}

/// Rectangle every body is confined to, re-derived from the viewport each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// Bounds covering a viewport anchored at the origin
    pub fn from_viewport(viewport: Vec2) -> Self {
        Self {
            min_x: 0.0,
            max_x: viewport.x,
            min_y: 0.0,
            max_y: viewport.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(normalized(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(110.0, 70.0)));
        assert!(rect.contains(Vec2::new(110.0, 20.0)));
        assert!(!rect.contains(Vec2::new(110.01, 40.0)));
        assert!(!rect.contains(Vec2::new(50.0, 19.99)));
    }

    #[test]
    fn test_bounds_from_viewport() {
        let bounds = Bounds::from_viewport(Vec2::new(800.0, 600.0));
        assert_eq!((bounds.min_x, bounds.max_x), (0.0, 800.0));
        assert_eq!((bounds.min_y, bounds.max_y), (0.0, 600.0));
    }

    proptest! {
        #[test]
        fn normalized_nonzero_has_unit_length(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            prop_assume!(x.abs() > 1.0e-3 || y.abs() > 1.0e-3);
            let n = normalized(Vec2::new(x, y));
            prop_assert!((n.length() - 1.0).abs() < 1.0e-4);
        }

        #[test]
        fn distance_is_symmetric(
            ax in -1.0e4f32..1.0e4, ay in -1.0e4f32..1.0e4,
            bx in -1.0e4f32..1.0e4, by in -1.0e4f32..1.0e4,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(a.distance(b), b.distance(a));
        }
    }
}
