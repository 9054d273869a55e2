//! Pointer input state machine
//!
//! Three pointer events drive every interactive leaf:
//! - down: visible leaves under the pointer darken and join the pending-press list
//! - up: every pending leaf releases; those still under the pointer are clicked
//! - move: leaves gain or lose hover as the pointer crosses their bounds
//!
//! Containers are walked transparently and never hit-tested themselves.
//! Hidden nodes (and hidden containers' subtrees) never transition.

use glam::Vec2;

use super::node::{NodeId, Scene};

/// Kind of an abstract input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    ScrollUp,
    ScrollDown,
}

impl EventKind {
    /// Map a DOM event type name; unknown names yield `None` and are ignored
    pub fn from_dom(name: &str) -> Option<Self> {
        match name {
            "mousedown" | "pointerdown" => Some(Self::PointerDown),
            "mouseup" | "pointerup" => Some(Self::PointerUp),
            "mousemove" | "pointermove" => Some(Self::PointerMove),
            "scrollup" => Some(Self::ScrollUp),
            "scrolldown" => Some(Self::ScrollDown),
            _ => None,
        }
    }
}

/// An input event at the core boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub position: Vec2,
}

impl Event {
    pub fn new(kind: EventKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// Which handler fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Click,
    ToggleChanged,
}

/// A handler invocation delivered to a [`Dispatch`] sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired<A> {
    pub node: NodeId,
    pub kind: HandlerKind,
    pub action: A,
}

/// Receiver of button handlers.
///
/// Handlers run synchronously, in order, with mutable access to the scene,
/// so a click handler can de-toggle a sibling before the clicked button's
/// own toggle-change handler runs.
pub trait Dispatch<A> {
    fn dispatch(&mut self, scene: &mut Scene<A>, fired: Fired<A>);
}

impl<A, F> Dispatch<A> for F
where
    F: FnMut(&mut Scene<A>, Fired<A>),
{
    fn dispatch(&mut self, scene: &mut Scene<A>, fired: Fired<A>) {
        self(scene, fired)
    }
}

/// Force a toggled button back to neutral and fire its toggle-change handler.
///
/// No-op for buttons that are not toggled (and for non-buttons).
pub fn detoggle<A: Copy>(scene: &mut Scene<A>, id: NodeId, sink: &mut impl Dispatch<A>) {
    let Some(button) = scene.button_mut(id) else {
        return;
    };
    if !button.detoggle() {
        return;
    }
    let on_toggle = button.on_toggle;
    if let Some(action) = on_toggle {
        sink.dispatch(
            scene,
            Fired {
                node: id,
                kind: HandlerKind::ToggleChanged,
                action,
            },
        );
    }
}

/// Ids of visible interactive leaves, depth-first, skipping hidden subtrees
fn visible_leaves<A>(scene: &Scene<A>) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = scene.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        let node = &scene[id];
        if !node.visible {
            continue;
        }
        if node.is_container() {
            stack.extend(node.children().iter().rev().copied());
        } else if node.is_interactive() {
            out.push(id);
        }
    }
    out
}

/// Per-session pointer state
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position
    pub pointer: Vec2,
    /// Leaves pressed at pointer-down, resolved at pointer-up
    pressed: Vec<NodeId>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pressed(&self) -> &[NodeId] {
        &self.pressed
    }

    pub fn pointer_down<A>(&mut self, scene: &mut Scene<A>, pos: Vec2) {
        self.pointer = pos;
        for id in visible_leaves(scene) {
            if !scene[id].contains_point(pos) {
                continue;
            }
            if let Some(button) = scene.button_mut(id) {
                button.press();
                self.pressed.push(id);
            }
        }
    }

    pub fn pointer_up<A: Copy>(&mut self, scene: &mut Scene<A>, pos: Vec2, sink: &mut impl Dispatch<A>) {
        self.pointer = pos;
        for id in std::mem::take(&mut self.pressed) {
            // A handler may have hidden this node since it was pressed
            if !scene[id].visible {
                continue;
            }
            let inside = scene[id].contains_point(pos);
            let Some(button) = scene.button_mut(id) else {
                continue;
            };
            button.release();
            if !inside {
                continue;
            }
            button.click();
            let (on_click, on_toggle) = (button.on_click, button.on_toggle);

            if let Some(action) = on_click {
                sink.dispatch(
                    scene,
                    Fired {
                        node: id,
                        kind: HandlerKind::Click,
                        action,
                    },
                );
            }
            if let Some(action) = on_toggle {
                sink.dispatch(
                    scene,
                    Fired {
                        node: id,
                        kind: HandlerKind::ToggleChanged,
                        action,
                    },
                );
            }
        }
    }

    pub fn pointer_move<A>(&mut self, scene: &mut Scene<A>, pos: Vec2) {
        self.pointer = pos;
        for id in visible_leaves(scene) {
            let inside = scene[id].contains_point(pos);
            let Some(button) = scene.button_mut(id) else {
                continue;
            };
            if !button.entered && inside {
                button.enter();
            } else if button.entered && !inside {
                button.exit();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::ui::button::Button;
    use crate::ui::layout::Layout;
    use crate::ui::node::Node;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Act {
        ClickX,
        ToggleX,
        ClickY,
        ToggleY,
    }

    fn square(x: f32) -> Node<Act> {
        Node::button(Button::new("b"))
            .at(Vec2::new(x, 0.0))
            .sized(Vec2::new(50.0, 50.0))
    }

    fn nav() -> (Scene<Act>, NodeId, NodeId) {
        let mut scene = Scene::new();
        let x = scene.add_root(square(0.0));
        let y = scene.add_root(square(100.0));
        scene.button_mut(x).unwrap().set_on_click(Some(Act::ClickX));
        scene.button_mut(x).unwrap().set_on_toggle(Some(Act::ToggleX));
        scene.button_mut(y).unwrap().set_on_click(Some(Act::ClickY));
        scene.button_mut(y).unwrap().set_on_toggle(Some(Act::ToggleY));
        (scene, x, y)
    }

    fn click(input: &mut InputState, scene: &mut Scene<Act>, pos: Vec2, log: &mut Vec<Act>, x: NodeId, y: NodeId) {
        input.pointer_down(scene, pos);
        input.pointer_up(scene, pos, &mut |scene: &mut Scene<Act>, fired: Fired<Act>| {
            log.push(fired.action);
            match fired.action {
                Act::ClickX => detoggle(scene, y, &mut |_: &mut Scene<Act>, f: Fired<Act>| log.push(f.action)),
                Act::ClickY => detoggle(scene, x, &mut |_: &mut Scene<Act>, f: Fired<Act>| log.push(f.action)),
                _ => {}
            }
        });
    }

    #[test]
    fn test_toggle_exclusivity() {
        let (mut scene, x, y) = nav();
        let mut input = InputState::new();
        let mut log = Vec::new();

        click(&mut input, &mut scene, Vec2::new(125.0, 25.0), &mut log, x, y);
        assert!(scene.button(y).unwrap().toggled);
        assert_eq!(log, vec![Act::ClickY, Act::ToggleY]);

        log.clear();
        click(&mut input, &mut scene, Vec2::new(25.0, 25.0), &mut log, x, y);
        assert!(scene.button(x).unwrap().toggled);
        assert!(!scene.button(y).unwrap().toggled);
        // Sibling de-toggled between the click and toggle handlers, exactly once
        assert_eq!(log, vec![Act::ClickX, Act::ToggleY, Act::ToggleX]);
    }

    #[test]
    fn test_hover_edge_is_inside() {
        let (mut scene, x, _) = nav();
        let mut input = InputState::new();
        input.pointer_move(&mut scene, Vec2::new(50.0, 50.0));
        assert!(scene.button(x).unwrap().entered);
        input.pointer_move(&mut scene, Vec2::new(50.5, 50.0));
        assert!(!scene.button(x).unwrap().entered);
        assert_eq!(scene.button(x).unwrap().body, Rgb::BLACK);
    }

    #[test]
    fn test_release_outside_does_not_click() {
        let (mut scene, x, _) = nav();
        let mut input = InputState::new();
        let mut fired = 0;
        input.pointer_down(&mut scene, Vec2::new(10.0, 10.0));
        assert_eq!(input.pressed(), &[x]);
        input.pointer_up(&mut scene, Vec2::new(400.0, 10.0), &mut |_: &mut Scene<Act>, _: Fired<Act>| fired += 1);
        assert_eq!(fired, 0);
        assert!(!scene.button(x).unwrap().toggled);
        assert!(input.pressed().is_empty());
    }

    #[test]
    fn test_hidden_nodes_never_transition() {
        let (mut scene, x, _) = nav();
        scene.set_visible(x, false);
        let mut input = InputState::new();
        input.pointer_move(&mut scene, Vec2::new(10.0, 10.0));
        input.pointer_down(&mut scene, Vec2::new(10.0, 10.0));
        assert!(!scene.button(x).unwrap().entered);
        assert!(input.pressed().is_empty());
        assert_eq!(scene.button(x).unwrap().body, Rgb::BLACK);
    }

    #[test]
    fn test_hidden_container_hides_subtree() {
        let mut scene: Scene<Act> = Scene::new();
        let col = scene.add_root(Node::container(Layout::Vertical).hidden());
        let inner = scene.add_child(col, square(0.0));
        let mut input = InputState::new();
        input.pointer_down(&mut scene, Vec2::new(10.0, 10.0));
        assert!(input.pressed().is_empty());
        assert_eq!(scene.button(inner).unwrap().body, Rgb::BLACK);
    }

    #[test]
    fn test_containers_walked_transparently() {
        let mut scene: Scene<Act> = Scene::new();
        let row = scene.add_root(
            Node::container(Layout::Horizontal)
                .sized(Vec2::new(100.0, 50.0)),
        );
        let left = scene.add_child(row, Node::button(Button::new("L")));
        let right = scene.add_child(row, Node::button(Button::new("R")));
        scene.layout_children(row);

        let mut input = InputState::new();
        input.pointer_down(&mut scene, Vec2::new(75.0, 25.0));
        assert_eq!(input.pressed(), &[right]);
        assert_eq!(scene.button(left).unwrap().body, Rgb::BLACK);
    }

    #[test]
    fn test_detoggle_untoggled_is_silent() {
        let (mut scene, x, _) = nav();
        let mut fired = 0;
        detoggle(&mut scene, x, &mut |_: &mut Scene<Act>, _: Fired<Act>| fired += 1);
        assert_eq!(fired, 0);
    }

    #[test]
    fn test_unknown_dom_event_ignored() {
        assert_eq!(EventKind::from_dom("mousedown"), Some(EventKind::PointerDown));
        assert_eq!(EventKind::from_dom("keydown"), None);
    }
}
