//! Reading pane
//!
//! Paragraphs are stacked from a fixed origin. Scrolling moves a target
//! offset; the paragraphs ease toward it every frame.

use glam::Vec2;

use crate::ui::{NodeId, Scene, TextMeasure};

#[derive(Debug, Clone)]
pub struct ReadingPane {
    pub paragraphs: Vec<NodeId>,
    /// Resting y of each paragraph at zero scroll
    base_y: Vec<f32>,
    origin: Vec2,
    gap: f32,
    /// Total stacked height including gaps
    height: f32,
    /// Target offset, always in `[-overflow, 0]`
    scroll: f32,
}

impl ReadingPane {
    pub fn new(paragraphs: Vec<NodeId>, origin: Vec2, gap: f32) -> Self {
        let base_y = vec![origin.y; paragraphs.len()];
        Self {
            paragraphs,
            base_y,
            origin,
            gap,
            height: 0.0,
            scroll: 0.0,
        }
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn base_y(&self) -> &[f32] {
        &self.base_y
    }

    /// Re-wrap every paragraph to `wrap_width` and restack them
    pub fn relayout<A>(&mut self, scene: &mut Scene<A>, measure: &mut dyn TextMeasure, wrap_width: f32) {
        let mut y = 0.0;
        for (i, &id) in self.paragraphs.iter().enumerate() {
            if let Some(item) = scene.text_mut(id) {
                item.set_max_width(wrap_width);
            }
            scene.reflow_text(id, measure);
            self.base_y[i] = self.origin.y + y;
            y += scene[id].size.y + self.gap;
        }
        self.height = y;
        log::trace!("Reading pane restacked: {} paragraphs, {:.0}px", self.paragraphs.len(), y);
    }

    /// How far the pane can scroll for a viewport of height `viewport_h`
    pub fn overflow(&self, viewport_h: f32) -> f32 {
        (self.height - viewport_h + self.origin.y).max(0.0)
    }

    pub fn scroll_up(&mut self, step: f32) {
        self.scroll = (self.scroll + step).min(0.0);
    }

    pub fn scroll_down(&mut self, step: f32, viewport_h: f32) {
        self.scroll = (self.scroll - step).max(-self.overflow(viewport_h));
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0.0;
    }

    pub fn set_visible<A>(&self, scene: &mut Scene<A>, visible: bool) {
        for &id in &self.paragraphs {
            scene.set_visible(id, visible);
        }
    }

    /// Ease each paragraph toward `base + scroll`, leaving `decay` of the
    /// error after one second
    pub fn ease<A>(&self, scene: &mut Scene<A>, decay: f32, dt: f32) {
        let keep = decay.powf(dt);
        for (&id, &base) in self.paragraphs.iter().zip(&self.base_y) {
            let target = base + self.scroll;
            let node = &mut scene[id];
            node.pos.x = self.origin.x;
            node.pos.y = (node.pos.y - target) * keep + target;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Node, TextItem, TextMetrics};

    struct Mono;

    impl TextMeasure for Mono {
        fn measure(&mut self, _font: &str, text: &str) -> TextMetrics {
            TextMetrics {
                width: text.chars().count() as f32 * 10.0,
                ascent: 8.0,
                descent: 2.0,
            }
        }
    }

    fn pane(texts: &[&str]) -> (Scene<()>, ReadingPane) {
        let mut scene = Scene::new();
        let ids = texts
            .iter()
            .map(|t| scene.add_root(Node::text(TextItem::new(*t, "f", 400.0))))
            .collect();
        let pane = ReadingPane::new(ids, Vec2::new(30.0, 200.0), 15.0);
        (scene, pane)
    }

    #[test]
    fn test_relayout_stacks_with_gap() {
        let (mut scene, mut pane) = pane(&["abcd", "abcdefgh"]);
        pane.relayout(&mut scene, &mut Mono, 40.0);
        // One line (10) then two lines (10 + 5 + 10)
        assert_eq!(pane.base_y(), &[200.0, 225.0]);
        assert_eq!(pane.height(), 10.0 + 15.0 + 25.0 + 15.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let (mut scene, mut pane) = pane(&["a"; 40]);
        pane.relayout(&mut scene, &mut Mono, 100.0);
        let viewport_h = 600.0;
        for _ in 0..100 {
            pane.scroll_down(40.0, viewport_h);
        }
        assert_eq!(pane.scroll(), -pane.overflow(viewport_h));
        assert_eq!(pane.overflow(viewport_h), 1000.0 - 600.0 + 200.0);

        pane.scroll_up(40.0);
        assert!(pane.scroll() <= 0.0);
        for _ in 0..100 {
            pane.scroll_up(40.0);
        }
        assert_eq!(pane.scroll(), 0.0);
    }

    #[test]
    fn test_short_pane_never_scrolls() {
        let (mut scene, mut pane) = pane(&["a"]);
        pane.relayout(&mut scene, &mut Mono, 100.0);
        pane.scroll_down(40.0, 600.0);
        assert_eq!(pane.scroll(), 0.0);
    }

    #[test]
    fn test_ease_converges() {
        let (mut scene, mut pane) = pane(&["a", "b"]);
        pane.relayout(&mut scene, &mut Mono, 100.0);
        pane.ease(&mut scene, 0.0001, 1.0);
        let id = pane.paragraphs[1];
        // 0.0001 of the starting error remains after one second
        let expected = (0.0 - 225.0) * 0.0001 + 225.0;
        assert!((scene[id].pos.y - expected).abs() < 1.0e-3);
        assert_eq!(scene[id].pos.x, 30.0);
    }
}
