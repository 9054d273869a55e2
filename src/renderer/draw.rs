//! Scene drawing
//!
//! Drawing is where layout happens: every container re-places its children
//! from its own geometry before anything is painted, and dirty text items
//! re-wrap against the surface's metrics.

use glam::Vec2;

use super::{Surface, SurfaceMeasure};
use crate::consts::{BUTTON_MARGIN, LINE_GAP};
use crate::geom::Rect;
use crate::px_font;
use crate::sim::{Body, SimContext};
use crate::ui::{BodyRef, Button, NodeId, NodeKind, Scene, TextItem};

/// Lay out and paint the whole forest, roots in order, skipping hidden subtrees
pub fn draw_scene<A>(scene: &mut Scene<A>, sim: &SimContext, surface: &mut dyn Surface) {
    layout_pass(scene, surface);

    let mut stack: Vec<NodeId> = scene.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let node = &scene[id];
        if !node.visible {
            continue;
        }
        match &node.kind {
            NodeKind::Button(button) => draw_button(surface, node.pos, node.size, button),
            NodeKind::Text(item) => draw_text(surface, node.pos, item),
            NodeKind::Disc(BodyRef::Pool(i)) => {
                if let Some(body) = sim.bodies.get(*i) {
                    draw_body(surface, body);
                }
            }
            NodeKind::Disc(BodyRef::Collector) => draw_body(surface, &sim.collector),
            NodeKind::Container(container) => stack.extend(container.children.iter().rev().copied()),
        }
    }
}

/// Containers first (parents before children), text reflow alongside
fn layout_pass<A>(scene: &mut Scene<A>, surface: &mut dyn Surface) {
    let mut order = Vec::new();
    scene.walk(|id, _| order.push(id));
    for id in order {
        if scene[id].is_container() {
            scene.layout_children(id);
        } else {
            scene.reflow_text(id, &mut SurfaceMeasure(&mut *surface));
        }
    }
}

fn draw_button<A>(surface: &mut dyn Surface, pos: Vec2, size: Vec2, button: &Button<A>) {
    surface.fill_rect(Rect::new(pos, size), button.body);

    let font = px_font(size.x.min(size.y) / 3.0);
    let metrics = surface.measure(&font, &button.label);
    let room = size.x - BUTTON_MARGIN;
    let origin = Vec2::new(
        pos.x + (size.x - metrics.width.min(room)) / 2.0,
        pos.y + (size.y + metrics.height()) / 2.0,
    );
    surface.fill_text(&button.label, origin, &font, button.palette.accent, Some(room));
}

fn draw_text(surface: &mut dyn Surface, pos: Vec2, item: &TextItem) {
    let mut y = 0.0;
    for line in item.lines() {
        let metrics = surface.measure(&item.font, line);
        surface.fill_text(line, Vec2::new(pos.x, pos.y + y), &item.font, item.color, None);
        y += metrics.height() + LINE_GAP;
    }
}

fn draw_body(surface: &mut dyn Surface, body: &Body) {
    let style = &body.style;
    if !style.visible {
        return;
    }
    if style.outline {
        surface.stroke_circle(body.pos, body.radius, style.fill);
    } else {
        surface.fill_circle(body.pos, body.radius, style.fill);
    }

    let caption = body.caption();
    let font = px_font(body.radius);
    let metrics = surface.measure(&font, &caption);
    let origin = Vec2::new(
        body.pos.x - (metrics.width / 2.0).min(body.radius * 0.95),
        body.pos.y + metrics.height() / 2.0,
    );
    surface.save();
    surface.rotate_about(body.pos, body.rotation);
    surface.fill_text(&caption, origin, &font, style.text, Some(body.radius * 1.9));
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::renderer::{DrawCmd, RecordingSurface};
    use crate::ui::{Layout, Node};

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_draw_lays_out_before_painting() {
        let mut scene: Scene<()> = Scene::new();
        let row = scene.add_root(Node::container(Layout::Horizontal).sized(Vec2::new(200.0, 100.0)));
        scene.add_child(row, Node::button(Button::new("A")));
        scene.add_child(row, Node::button(Button::new("B")));
        let sim = SimContext::new(Vec2::new(800.0, 600.0));
        let mut surface = surface();

        draw_scene(&mut scene, &sim, &mut surface);
        let rects: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].size, Vec2::new(99.0, 100.0));
        assert_eq!(rects[1].origin, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut scene: Scene<()> = Scene::new();
        let col = scene.add_root(Node::container(Layout::Vertical).sized(Vec2::new(100.0, 100.0)).hidden());
        scene.add_child(col, Node::button(Button::new("A")));
        let sim = SimContext::new(Vec2::new(800.0, 600.0));
        let mut surface = surface();

        draw_scene(&mut scene, &sim, &mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_bodies_draw_with_caption() {
        let mut scene: Scene<()> = Scene::new();
        scene.add_root(Node::disc(BodyRef::Pool(0)));
        scene.add_root(Node::disc(BodyRef::Collector));
        let mut sim = SimContext::new(Vec2::new(800.0, 600.0));
        sim.bodies.push(Body::new(Vec2::new(50.0, 50.0), 10.0, 3));
        let mut surface = surface();

        draw_scene(&mut scene, &sim, &mut surface);
        // Hidden collector contributes nothing
        assert_eq!(surface.texts(), vec!["3"]);
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            DrawCmd::Circle { outline: false, color: Rgb::BLACK, .. }
        )));

        sim.collector.style.visible = true;
        surface.clear_commands();
        draw_scene(&mut scene, &sim, &mut surface);
        assert_eq!(surface.texts(), vec!["3", "0"]);
        assert!(surface.commands().iter().any(|c| matches!(c, DrawCmd::Circle { outline: true, .. })));
    }

    #[test]
    fn test_text_reflows_on_draw() {
        let mut scene: Scene<()> = Scene::new();
        let id = scene.add_root(Node::text(TextItem::new("abcdef", "16pt Arial", 24.0)));
        let sim = SimContext::new(Vec2::new(800.0, 600.0));
        let mut surface = surface();

        draw_scene(&mut scene, &sim, &mut surface);
        assert_eq!(surface.texts(), vec!["abc", "def"]);
        assert!(scene[id].size.y > 0.0);
    }
}
