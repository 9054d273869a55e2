//! Container layout rules
//!
//! Layout is not cached. Containers re-place their children on every draw
//! pass from their own current geometry, so a resized container heals its
//! subtree without any invalidation.

use glam::Vec2;

use crate::geom::Rect;

/// How a container places its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Equal columns across the container width
    Horizontal,
    /// Equal rows down the container height
    Vertical,
    /// No resizing: children take the container's position and visibility
    Group,
}

/// Whether a child adopts the container's extent on the non-partitioned axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAxis {
    #[default]
    Fill,
    /// Keep the child's own extent (e.g. a column taller than its row)
    Keep,
}

/// Geometry assigned to one child
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    /// `None` on an axis means the child keeps its own extent there
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Visibility pushed down from the container, if the rule propagates it
    pub visible: Option<bool>,
}

/// Offset and length of slot `index` when `extent` is split `count` ways.
///
/// Every slot but the last is one unit short, leaving a hairline gap.
#[inline]
pub fn partition(extent: f32, count: usize, index: usize) -> (f32, f32) {
    let share = extent / count as f32;
    let gap = if index + 1 != count { 1.0 } else { 0.0 };
    (share * index as f32, share - gap)
}

/// Where child `index` of `count` goes inside `parent`.
///
/// Returns `None` for an empty container.
pub fn place(
    layout: Layout,
    parent: Rect,
    parent_visible: bool,
    index: usize,
    count: usize,
    cross: CrossAxis,
) -> Option<Placement> {
    if count == 0 || index >= count {
        return None;
    }
    let fill = cross == CrossAxis::Fill;
    let placement = match layout {
        Layout::Horizontal => {
            let (offset, width) = partition(parent.size.x, count, index);
            Placement {
                pos: Vec2::new(parent.origin.x + offset, parent.origin.y),
                width: Some(width),
                height: fill.then_some(parent.size.y),
                visible: None,
            }
        }
        Layout::Vertical => {
            let (offset, height) = partition(parent.size.y, count, index);
            Placement {
                pos: Vec2::new(parent.origin.x, parent.origin.y + offset),
                width: fill.then_some(parent.size.x),
                height: Some(height),
                visible: None,
            }
        }
        Layout::Group => Placement {
            pos: parent.origin,
            width: None,
            height: None,
            visible: Some(parent_visible),
        },
    };
    Some(placement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_horizontal_last_child_gets_full_share() {
        let parent = rect(0.0, 0.0, 300.0, 50.0);
        let first = place(Layout::Horizontal, parent, true, 0, 3, CrossAxis::Fill).unwrap();
        let last = place(Layout::Horizontal, parent, true, 2, 3, CrossAxis::Fill).unwrap();
        assert_eq!(first.width, Some(99.0));
        assert_eq!(last.width, Some(100.0));
        assert_eq!(last.pos, Vec2::new(200.0, 0.0));
        assert_eq!(first.height, Some(50.0));
    }

    #[test]
    fn test_keep_cross_axis_leaves_height() {
        let parent = rect(0.0, 0.0, 200.0, 50.0);
        let p = place(Layout::Horizontal, parent, true, 0, 2, CrossAxis::Keep).unwrap();
        assert_eq!(p.height, None);
    }

    #[test]
    fn test_vertical_partitions_height() {
        let parent = rect(10.0, 20.0, 80.0, 200.0);
        let p = place(Layout::Vertical, parent, true, 1, 2, CrossAxis::Fill).unwrap();
        assert_eq!(p.pos, Vec2::new(10.0, 120.0));
        assert_eq!(p.height, Some(100.0));
        assert_eq!(p.width, Some(80.0));
    }

    #[test]
    fn test_group_copies_position_and_visibility() {
        let parent = rect(5.0, 6.0, 80.0, 200.0);
        let p = place(Layout::Group, parent, false, 0, 4, CrossAxis::Fill).unwrap();
        assert_eq!(p.pos, Vec2::new(5.0, 6.0));
        assert_eq!(p.width, None);
        assert_eq!(p.visible, Some(false));
    }

    #[test]
    fn test_empty_container_places_nothing() {
        let parent = rect(0.0, 0.0, 100.0, 100.0);
        assert!(place(Layout::Horizontal, parent, true, 0, 0, CrossAxis::Fill).is_none());
    }

    proptest! {
        #[test]
        fn partition_fills_extent_minus_gaps(width in 1.0f32..5000.0, count in 1usize..32, x in -500.0f32..500.0) {
            let parent = rect(x, 0.0, width, 10.0);
            let mut total = 0.0f32;
            for i in 0..count {
                let p = place(Layout::Horizontal, parent, true, i, count, CrossAxis::Fill).unwrap();
                prop_assert!(p.pos.x >= parent.origin.x - 1.0e-3);
                total += p.width.unwrap();
            }
            let gaps = (count - 1) as f32;
            prop_assert!((total - (width - gaps)).abs() < 1.0e-2 * count as f32);
        }
    }
}
