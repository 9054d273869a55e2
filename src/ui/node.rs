//! Retained scene graph
//!
//! Nodes live in an arena owned by [`Scene`] and are addressed by [`NodeId`].
//! The scene is a forest: an ordered list of root nodes, each possibly a
//! container with an ordered list of children. Traversal dispatches on the
//! capabilities a node declares ([`Node::is_container`],
//! [`Node::is_interactive`]), never on a concrete type check.

use std::ops::{Index, IndexMut};

use glam::Vec2;

use super::button::Button;
use super::layout::{CrossAxis, Layout, place};
use super::text::{TextMeasure, block_size, wrap_lines};
use crate::color::Rgb;
use crate::consts::LINE_GAP;
use crate::geom::Rect;

/// Handle to a node in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which simulated body a disc node paints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRef {
    /// Index into the body pool
    Pool(usize),
    /// The scoring collector
    Collector,
}

/// Multi-line static text whose size derives from content, font and wrap width
#[derive(Debug, Clone)]
pub struct TextItem {
    content: String,
    pub font: String,
    pub color: Rgb,
    max_width: f32,
    lines: Vec<String>,
    dirty: bool,
}

impl TextItem {
    pub fn new(content: impl Into<String>, font: impl Into<String>, max_width: f32) -> Self {
        Self {
            content: content.into(),
            font: font.into(),
            color: Rgb::BLACK,
            max_width,
            lines: Vec::new(),
            dirty: true,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content != self.content {
            self.content = content;
            self.dirty = true;
        }
    }

    pub fn max_width(&self) -> f32 {
        self.max_width
    }

    pub fn set_max_width(&mut self, max_width: f32) {
        if max_width != self.max_width {
            self.max_width = max_width;
            self.dirty = true;
        }
    }

    /// Wrapped lines from the last reflow
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn needs_reflow(&self) -> bool {
        self.dirty
    }

    /// Re-wrap and return the new bounding size
    pub fn reflow(&mut self, measure: &mut dyn TextMeasure) -> Vec2 {
        self.lines = wrap_lines(measure, &self.font, &self.content, self.max_width);
        self.dirty = false;
        let (w, h) = block_size(measure, &self.font, &self.lines, LINE_GAP);
        Vec2::new(w, h)
    }
}

/// A layout container and its ordered children
#[derive(Debug, Clone)]
pub struct Container {
    pub layout: Layout,
    pub children: Vec<NodeId>,
}

/// What a node is
#[derive(Debug, Clone)]
pub enum NodeKind<A> {
    Button(Button<A>),
    Text(TextItem),
    Container(Container),
    Disc(BodyRef),
}

/// A scene node: shared geometry and visibility plus its kind
#[derive(Debug, Clone)]
pub struct Node<A> {
    pub pos: Vec2,
    pub size: Vec2,
    /// Gates drawing and hit-testing (for containers, the whole subtree)
    pub visible: bool,
    /// Sizing policy this node asks of a parent layout
    pub cross_axis: CrossAxis,
    pub kind: NodeKind<A>,
}

impl<A> Node<A> {
    pub fn new(kind: NodeKind<A>) -> Self {
        Self {
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            visible: true,
            cross_axis: CrossAxis::Fill,
            kind,
        }
    }

    pub fn button(button: Button<A>) -> Self {
        Self::new(NodeKind::Button(button))
    }

    pub fn text(item: TextItem) -> Self {
        Self::new(NodeKind::Text(item))
    }

    pub fn container(layout: Layout) -> Self {
        Self::new(NodeKind::Container(Container {
            layout,
            children: Vec::new(),
        }))
    }

    pub fn disc(body: BodyRef) -> Self {
        Self::new(NodeKind::Disc(body))
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn sized(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn keep_cross_axis(mut self) -> Self {
        self.cross_axis = CrossAxis::Keep;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Recurse into children during traversal
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Container(_))
    }

    /// Participates in hover/press/click
    pub fn is_interactive(&self) -> bool {
        matches!(self.kind, NodeKind::Button(_))
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Container(c) => &c.children,
            _ => &[],
        }
    }

    /// Inclusive bounds test (only meaningful for interactive nodes)
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.bounds().contains(p)
    }

    pub fn as_button(&self) -> Option<&Button<A>> {
        match &self.kind {
            NodeKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button<A>> {
        match &mut self.kind {
            NodeKind::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextItem> {
        match &self.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextItem> {
        match &mut self.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Arena-backed forest of nodes
#[derive(Debug, Clone)]
pub struct Scene<A> {
    nodes: Vec<Node<A>>,
    roots: Vec<NodeId>,
}

impl<A> Default for Scene<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scene<A> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn insert(&mut self, node: Node<A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Add a top-level node; roots are drawn and dispatched in insertion order
    pub fn add_root(&mut self, node: Node<A>) -> NodeId {
        let id = self.insert(node);
        self.roots.push(id);
        id
    }

    /// Append a child to a container.
    ///
    /// Adding to a non-container still allocates the node but leaves it detached.
    pub fn add_child(&mut self, parent: NodeId, node: Node<A>) -> NodeId {
        let id = self.insert(node);
        match &mut self.nodes[parent.index()].kind {
            NodeKind::Container(c) => c.children.push(id),
            _ => log::warn!("Node {:?} is not a container; child {:?} left detached", parent, id),
        }
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<A>> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<A>> {
        self.nodes.get_mut(id.index())
    }

    pub fn button(&self, id: NodeId) -> Option<&Button<A>> {
        self.get(id).and_then(Node::as_button)
    }

    pub fn button_mut(&mut self, id: NodeId) -> Option<&mut Button<A>> {
        self.get_mut(id).and_then(Node::as_button_mut)
    }

    pub fn text(&self, id: NodeId) -> Option<&TextItem> {
        self.get(id).and_then(Node::as_text)
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut TextItem> {
        self.get_mut(id).and_then(Node::as_text_mut)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.get_mut(id) {
            node.visible = visible;
        }
    }

    pub fn set_pos(&mut self, id: NodeId, pos: Vec2) {
        if let Some(node) = self.get_mut(id) {
            node.pos = pos;
        }
    }

    /// Re-place the children of a container from its current geometry
    pub fn layout_children(&mut self, id: NodeId) {
        let node = &self.nodes[id.index()];
        let NodeKind::Container(container) = &node.kind else {
            return;
        };
        let (layout, parent, visible) = (container.layout, node.bounds(), node.visible);
        let children = container.children.clone();

        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            let child = &mut self.nodes[child.index()];
            let Some(p) = place(layout, parent, visible, index, count, child.cross_axis) else {
                continue;
            };
            child.pos = p.pos;
            if let Some(w) = p.width {
                child.size.x = w;
            }
            if let Some(h) = p.height {
                child.size.y = h;
            }
            if let Some(v) = p.visible {
                child.visible = v;
            }
        }
    }

    /// Re-wrap a text node if its content or width changed
    pub fn reflow_text(&mut self, id: NodeId, measure: &mut dyn TextMeasure) {
        let node = &mut self.nodes[id.index()];
        if let NodeKind::Text(item) = &mut node.kind {
            if item.needs_reflow() {
                node.size = item.reflow(measure);
            }
        }
    }

    /// Depth-first pre-order walk over the whole forest, visible or not
    pub fn walk(&self, mut visit: impl FnMut(NodeId, &Node<A>)) {
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            visit(id, node);
            stack.extend(node.children().iter().rev().copied());
        }
    }
}

impl<A> Index<NodeId> for Scene<A> {
    type Output = Node<A>;

    fn index(&self, id: NodeId) -> &Node<A> {
        &self.nodes[id.index()]
    }
}

impl<A> IndexMut<NodeId> for Scene<A> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<A> {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::text::TextMetrics;

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

    #[test]
    fn test_nested_layout() {
        let mut scene: Scene<()> = Scene::new();
        let row = scene.add_root(
            Node::container(Layout::Horizontal)
                .at(Vec2::new(100.0, 50.0))
                .sized(Vec2::new(200.0, 100.0)),
        );
        let col = scene.add_child(
            row,
            Node::container(Layout::Vertical)
                .sized(Vec2::new(0.0, 200.0))
                .keep_cross_axis(),
        );
        let right = scene.add_child(row, Node::button(Button::new("B")));
        let top = scene.add_child(col, Node::button(Button::new("A")));
        let bottom = scene.add_child(col, Node::button(Button::new("C")));

        scene.layout_children(row);
        scene.layout_children(col);

        assert_eq!(scene[col].pos, Vec2::new(100.0, 50.0));
        assert_eq!(scene[col].size, Vec2::new(99.0, 200.0));
        assert_eq!(scene[right].bounds(), Rect::new(Vec2::new(200.0, 50.0), Vec2::new(100.0, 100.0)));
        assert_eq!(scene[top].size, Vec2::new(99.0, 99.0));
        assert_eq!(scene[bottom].pos, Vec2::new(100.0, 150.0));
        assert_eq!(scene[bottom].size, Vec2::new(99.0, 100.0));
    }

    #[test]
    fn test_layout_self_heals_after_resize() {
        let mut scene: Scene<()> = Scene::new();
        let row = scene.add_root(Node::container(Layout::Horizontal).sized(Vec2::new(200.0, 10.0)));
        let a = scene.add_child(row, Node::button(Button::new("A")));
        scene.layout_children(row);
        assert_eq!(scene[a].size.x, 200.0);

        scene[row].size.x = 640.0;
        scene.layout_children(row);
        assert_eq!(scene[a].size.x, 640.0);
    }

    #[test]
    fn test_group_propagates_visibility() {
        let mut scene: Scene<()> = Scene::new();
        let group = scene.add_root(Node::container(Layout::Group).at(Vec2::new(7.0, 8.0)).hidden());
        let child = scene.add_child(group, Node::button(Button::new("X")).sized(Vec2::new(30.0, 30.0)));
        scene.layout_children(group);
        assert!(!scene[child].visible);
        assert_eq!(scene[child].pos, Vec2::new(7.0, 8.0));
        assert_eq!(scene[child].size, Vec2::new(30.0, 30.0));
    }

    #[test]
    fn test_text_reflow_sets_size() {
        let mut scene: Scene<()> = Scene::new();
        let id = scene.add_root(Node::text(TextItem::new("abcdef", "16px Arial", 40.0)));
        scene.reflow_text(id, &mut Mono);
        assert_eq!(scene[id].size, Vec2::new(40.0, 25.0));

        scene.text_mut(id).unwrap().set_max_width(100.0);
        scene.reflow_text(id, &mut Mono);
        assert_eq!(scene[id].size, Vec2::new(60.0, 10.0));
    }

    #[test]
    fn test_walk_is_depth_first_in_order() {
        let mut scene: Scene<()> = Scene::new();
        let a = scene.add_root(Node::container(Layout::Vertical));
        let a1 = scene.add_child(a, Node::button(Button::new("1")));
        let b = scene.add_root(Node::button(Button::new("2")));
        let a2 = scene.add_child(a, Node::button(Button::new("3")));

        let mut order = Vec::new();
        scene.walk(|id, _| order.push(id));
        assert_eq!(order, vec![a, a1, a2, b]);
    }

    #[test]
    fn test_capabilities() {
        let container: Node<()> = Node::container(Layout::Group);
        let button: Node<()> = Node::button(Button::new("x"));
        let disc: Node<()> = Node::disc(BodyRef::Collector);
        assert!(container.is_container() && !container.is_interactive());
        assert!(button.is_interactive() && !button.is_container());
        assert!(!disc.is_interactive() && !disc.is_container());
    }
}
