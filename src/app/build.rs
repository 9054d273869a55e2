//! Scene construction
//!
//! Root order is paint order: reading pane, navigation, balls, then the
//! quiz widgets on top.

use glam::Vec2;

use super::Action;
use crate::consts::*;
use crate::content::{Choice, Content};
use crate::settings::Settings;
use crate::sim::SimContext;
use crate::ui::{BodyRef, Button, Layout, Node, NodeId, Scene, TextItem};

/// Handles to every node the presentation logic touches
#[derive(Debug, Clone)]
pub struct Widgets {
    pub nav: NodeId,
    pub reading_button: NodeId,
    pub game_button: NodeId,
    pub credits: NodeId,
    pub credits_header: NodeId,
    /// Lines and links below the credits header
    pub credits_items: Vec<NodeId>,
    pub paragraphs: Vec<NodeId>,
    pub choice_grid: NodeId,
    /// Answer buttons in `Choice::ALL` order
    pub choices: [NodeId; 4],
    pub prompt: NodeId,
    pub drop: NodeId,
}

impl Widgets {
    pub fn choice(&self, choice: Choice) -> NodeId {
        self.choices[choice as usize]
    }
}

pub fn build_scene(settings: &Settings, content: &Content, sim: &SimContext, viewport: Vec2) -> (Scene<Action>, Widgets) {
    let palette = settings.palette();
    let button = |label: &str| Node::button(Button::new(label).with_palette(palette));
    let mut scene = Scene::new();

    let paragraphs: Vec<NodeId> = content
        .reading
        .iter()
        .map(|text| {
            let mut item = TextItem::new(text.as_str(), settings.font.as_str(), viewport.x - READING_RIGHT_INSET);
            item.color = settings.text_color;
            scene.add_root(Node::text(item).at(settings.reading_origin).hidden())
        })
        .collect();

    // Navigation: children keep their own heights
    let nav = scene.add_root(Node::container(Layout::Horizontal).sized(Vec2::new(viewport.x, NAV_HEIGHT)));
    let nav_button = |label: &str, click: Action, toggle: Action| {
        Node::button(
            Button::new(label)
                .with_palette(palette)
                .on_click(click)
                .on_toggle(toggle),
        )
        .sized(Vec2::new(NAV_HEIGHT, NAV_HEIGHT))
        .keep_cross_axis()
    };
    let reading_button = scene.add_child(
        nav,
        nav_button("Reading (Do First)", Action::ReadingClicked, Action::ReadingToggled),
    );
    let game_button = scene.add_child(nav, nav_button("Game", Action::GameClicked, Action::GameToggled));

    let credits = scene.add_child(
        nav,
        Node::container(Layout::Vertical)
            .sized(Vec2::new(NAV_HEIGHT, credits_height(viewport)))
            .keep_cross_axis(),
    );
    let credits_header = scene.add_child(
        credits,
        Node::button(
            Button::new(content.credits.header.as_str())
                .with_palette(palette)
                .on_click(Action::CreditsClicked),
        ),
    );
    let mut credits_items = Vec::new();
    for line in &content.credits.lines {
        credits_items.push(scene.add_child(credits, button(line.as_str()).hidden()));
    }
    for (i, link) in content.credits.links.iter().enumerate() {
        let node = Node::button(
            Button::new(link.label.as_str())
                .with_palette(palette)
                .on_click(Action::OpenLink(i)),
        );
        credits_items.push(scene.add_child(credits, node.hidden()));
    }

    for i in 0..sim.bodies.len() {
        scene.add_root(Node::disc(BodyRef::Pool(i)));
    }

    // Answer grid: A C in the left column, B D in the right
    let choice_grid = scene.add_root(
        Node::container(Layout::Horizontal).sized(Vec2::new(CHOICE_GRID_WIDTH, CHOICE_GRID_HEIGHT)),
    );
    let columns = [
        scene.add_child(
            choice_grid,
            Node::container(Layout::Vertical)
                .sized(Vec2::new(0.0, 2.0 * CHOICE_GRID_HEIGHT))
                .keep_cross_axis(),
        ),
        scene.add_child(
            choice_grid,
            Node::container(Layout::Vertical)
                .sized(Vec2::new(0.0, 2.0 * CHOICE_GRID_HEIGHT))
                .keep_cross_axis(),
        ),
    ];
    let mut choices = [choice_grid; 4];
    for choice in [Choice::A, Choice::C, Choice::B, Choice::D] {
        let column = columns[choice as usize % 2];
        let node = Node::button(
            Button::new(choice.label())
                .with_palette(palette)
                .on_click(Action::Answer(choice)),
        );
        choices[choice as usize] = scene.add_child(column, node.hidden());
    }

    let mut prompt_item = TextItem::new("", settings.font.as_str(), PROMPT_WRAP_WIDTH);
    prompt_item.color = settings.text_color;
    let prompt = scene.add_root(Node::text(prompt_item).hidden());

    let drop = scene.add_root(
        Node::button(Button::new("Drop!").with_palette(palette).on_click(Action::Drop))
            .sized(Vec2::splat(DROP_BUTTON_SIZE))
            .hidden(),
    );
    scene.add_root(Node::disc(BodyRef::Collector));

    let widgets = Widgets {
        nav,
        reading_button,
        game_button,
        credits,
        credits_header,
        credits_items,
        paragraphs,
        choice_grid,
        choices,
        prompt,
        drop,
    };
    (scene, widgets)
}

/// Credits column height for a viewport
pub fn credits_height(viewport: Vec2) -> f32 {
    viewport.y.min(CREDITS_MAX_HEIGHT)
}
