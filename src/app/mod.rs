//! Frame driver and presentation
//!
//! [`Presentation`] owns one session: the scene, the pointer state, the
//! physics context and the quiz. The host calls [`Presentation::frame`] on
//! every animation tick and forwards input through
//! [`Presentation::handle_event`].
//!
//! Per frame:
//! 1. measure the delta since the previous frame
//! 2. refresh the simulation bounds from the surface's viewport
//! 3. step the physics
//! 4. clear and draw the scene (container layout happens here)
//! 5. run the logic update (re-centring, easing, Drop reveal)
//! 6. advance logical time and fire due deferred tasks

mod build;
mod logic;
pub mod quiz;
pub mod reading;

use glam::Vec2;

pub use build::Widgets;
pub use quiz::{Quiz, QuizPhase};

use self::logic::Logic;
use self::reading::ReadingPane;
use crate::content::{Choice, Content};
use crate::renderer::{Surface, SurfaceMeasure, draw_scene};
use crate::schedule::DeferredQueue;
use crate::settings::Settings;
use crate::sim::{self, SimContext};
use crate::ui::{Event, EventKind, InputState, Scene, TextMeasure};

/// Button handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadingClicked,
    ReadingToggled,
    GameClicked,
    GameToggled,
    CreditsClicked,
    /// Index into the credits links
    OpenLink(usize),
    Answer(Choice),
    Drop,
}

/// Work deferred to a later frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Freeze the arena and tally the collector
    Score,
    /// Thaw the arena and move to the next question
    FinishRound,
}

/// Requests for the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a page in a new tab
    OpenUrl(String),
}

pub struct Presentation {
    scene: Scene<Action>,
    input: InputState,
    logic: Logic,
    /// Timestamp of the previous frame (milliseconds)
    last_ms: Option<f64>,
}

impl Presentation {
    /// Build a session sized to `surface`
    pub fn new(settings: Settings, content: Content, surface: &mut dyn Surface) -> Self {
        let viewport = surface.viewport();
        let mut sim = SimContext::new(viewport);
        sim.spawn_stack(&settings.stack, settings.seed);

        let (mut scene, widgets) = build::build_scene(&settings, &content, &sim, viewport);
        let reading = ReadingPane::new(
            widgets.paragraphs.clone(),
            settings.reading_origin,
            settings.paragraph_gap,
        );

        log::info!(
            "Session started: seed {:#x}, {} balls, viewport {}x{}",
            settings.seed,
            sim.bodies.len(),
            viewport.x,
            viewport.y
        );

        let mut logic = Logic {
            settings,
            content,
            sim,
            widgets,
            reading,
            quiz: Quiz::default(),
            queue: DeferredQueue::new(),
            effects: Vec::new(),
            viewport,
        };
        logic.viewport_changed(&mut scene, viewport, &mut SurfaceMeasure(surface));

        Self {
            scene,
            input: InputState::new(),
            logic,
            last_ms: None,
        }
    }

    /// Run one animation tick at host time `now_ms`
    pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, self.logic.settings.max_frame_dt as f64) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        let viewport = surface.viewport();
        if viewport != self.logic.viewport {
            self.viewport_changed(viewport, &mut SurfaceMeasure(&mut *surface));
        }
        self.logic.sim.refresh_bounds(viewport);
        sim::step(&mut self.logic.sim, dt);

        surface.clear();
        draw_scene(&mut self.scene, &self.logic.sim, surface);

        self.logic.update(&mut self.scene, dt);

        self.logic.queue.advance(dt as f64);
        while let Some(task) = self.logic.queue.pop_due(&self.logic.quiz) {
            self.logic.run_task(&mut self.scene, task);
        }
    }

    /// Route an input event; wheel notches scroll, pointer events go to the UI
    pub fn handle_event(&mut self, event: Event) {
        let pos = event.position;
        match event.kind {
            EventKind::PointerDown => self.input.pointer_down(&mut self.scene, pos),
            EventKind::PointerUp => self.input.pointer_up(&mut self.scene, pos, &mut self.logic),
            EventKind::PointerMove => self.input.pointer_move(&mut self.scene, pos),
            EventKind::ScrollUp => self.logic.scroll(true),
            EventKind::ScrollDown => self.logic.scroll(false),
        }
    }

    /// The viewport was resized: re-wrap the reading pane
    pub fn viewport_changed(&mut self, size: Vec2, measure: &mut dyn TextMeasure) {
        log::debug!("Viewport changed to {}x{}", size.x, size.y);
        self.logic.viewport_changed(&mut self.scene, size, measure);
    }

    /// Host requests produced since the last call
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.logic.effects)
    }

    pub fn scene(&self) -> &Scene<Action> {
        &self.scene
    }

    pub fn sim(&self) -> &SimContext {
        &self.logic.sim
    }

    pub fn quiz(&self) -> &Quiz {
        &self.logic.quiz
    }

    pub fn widgets(&self) -> &Widgets {
        &self.logic.widgets
    }

    pub fn reading(&self) -> &ReadingPane {
        &self.logic.reading
    }

    pub fn pending_tasks(&self) -> usize {
        self.logic.queue.len()
    }
}
