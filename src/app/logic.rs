//! Presentation logic
//!
//! Button handlers, the per-frame logic update and deferred quiz tasks all
//! mutate the same state, which lives here apart from the scene so that a
//! handler can hold the scene and the logic at once.

use glam::Vec2;

use super::build::{Widgets, credits_height};
use super::quiz::{Quiz, QuizPhase, round_caption};
use super::reading::ReadingPane;
use super::{Action, Effect, Task};
use crate::color::Rgb;
use crate::consts::*;
use crate::content::{Choice, Content};
use crate::schedule::DeferredQueue;
use crate::settings::Settings;
use crate::sim::{PhysicsMode, SimContext};
use crate::ui::{Dispatch, Fired, Scene, TextMeasure, detoggle};

/// Balls must rise above `h / 2 + this` before Drop appears
const DROP_REVEAL_OFFSET: f32 = 100.0;
/// Gather point sits this far above the viewport centre
const GATHER_OFFSET: f32 = 200.0;
/// Collector sits this far below the viewport centre
const COLLECTOR_OFFSET: f32 = 200.0;

#[derive(Debug)]
pub struct Logic {
    pub settings: Settings,
    pub content: Content,
    pub sim: SimContext,
    pub widgets: Widgets,
    pub reading: ReadingPane,
    pub quiz: Quiz,
    pub queue: DeferredQueue<Quiz, Task>,
    pub effects: Vec<Effect>,
    /// Viewport the reading pane was last laid out for
    pub viewport: Vec2,
}

impl Logic {
    /// Re-wrap and restack everything whose geometry follows the viewport
    pub fn viewport_changed(&mut self, scene: &mut Scene<Action>, size: Vec2, measure: &mut dyn TextMeasure) {
        self.viewport = size;
        self.reading.relayout(scene, measure, size.x - READING_RIGHT_INSET);
        scene[self.widgets.credits].size.y = credits_height(size);
    }

    /// Per-frame reconciliation after drawing
    pub fn update(&mut self, scene: &mut Scene<Action>, dt: f32) {
        let size = self.viewport;

        if matches!(self.quiz.phase, QuizPhase::Gathering | QuizPhase::AwaitingDrop) {
            self.gather(scene, dt);
        }

        scene[self.widgets.nav].size.x = size.x;
        self.reading.ease(scene, self.settings.scroll_decay, dt);

        let centre = size / 2.0;
        scene.set_pos(
            self.widgets.choice_grid,
            centre - Vec2::new(CHOICE_GRID_WIDTH / 2.0, CHOICE_GRID_HEIGHT),
        );
        let prompt_w = scene[self.widgets.prompt].size.x;
        scene.set_pos(
            self.widgets.prompt,
            Vec2::new((size.x - prompt_w) / 2.0, centre.y - GATHER_OFFSET),
        );
        scene.set_pos(self.widgets.drop, centre - Vec2::splat(DROP_BUTTON_SIZE / 2.0));
        self.sim.collector.pos = Vec2::new(centre.x, centre.y + COLLECTOR_OFFSET);
    }

    /// Ease every ball toward the gather point and reveal Drop once they are up
    fn gather(&mut self, scene: &mut Scene<Action>, dt: f32) {
        let Some(target) = self.quiz.gather_target else {
            return;
        };
        let keep = self.settings.gather_decay.powf(dt);
        let mut lowest = f32::MIN;
        for body in &mut self.sim.bodies {
            body.pos = (body.pos - target) * keep + target;
            lowest = lowest.max(body.pos.y);
        }
        if lowest < self.viewport.y / 2.0 + DROP_REVEAL_OFFSET {
            scene.set_visible(self.widgets.drop, true);
            if self.quiz.phase == QuizPhase::Gathering {
                log::debug!("Balls gathered; Drop revealed");
                self.quiz.phase = QuizPhase::AwaitingDrop;
            }
        }
    }

    /// Wheel notch: scroll the reading pane and shove every ball
    pub fn scroll(&mut self, up: bool) {
        let impulse = self.settings.scroll_impulse;
        if up {
            self.sim.push_all(impulse, Vec2::Y);
            self.reading.scroll_up(self.settings.scroll_step);
        } else {
            self.sim.push_all(impulse, -Vec2::Y);
            self.reading.scroll_down(self.settings.scroll_step, self.viewport.y);
        }
    }

    fn set_prompt(&self, scene: &mut Scene<Action>, text: &str) {
        if let Some(item) = scene.text_mut(self.widgets.prompt) {
            item.set_content(text);
        }
    }

    fn set_choices_visible(&self, scene: &mut Scene<Action>, visible: bool) {
        for id in self.widgets.choices {
            scene.set_visible(id, visible);
        }
    }

    /// Show the current question, or the final message after the last one
    fn ask_next(&mut self, scene: &mut Scene<Action>) {
        if !self.quiz.is_active() {
            return;
        }
        match self.quiz.current(&self.content.questions) {
            Some(question) => {
                let prompt = question.prompt.clone();
                self.set_prompt(scene, &prompt);
                self.quiz.phase = QuizPhase::Asking;
            }
            None => {
                let message = self.content.final_message.clone();
                self.set_prompt(scene, &message);
                self.set_choices_visible(scene, false);
                self.quiz.phase = QuizPhase::Finished;
                log::info!("Quiz finished with score {}", self.quiz.score);
            }
        }
    }

    /// Game toggled on (fresh session) or off (session torn down)
    fn toggle_game(&mut self, scene: &mut Scene<Action>, on: bool) {
        self.quiz.restart(on);
        self.sim.set_mode(PhysicsMode::Active);
        self.sim.set_gravity_scale(1.0);
        for body in &mut self.sim.bodies {
            body.style.text = Rgb::WHITE;
        }

        self.set_choices_visible(scene, on);
        scene.set_visible(self.widgets.prompt, on);
        scene.set_visible(self.widgets.drop, false);

        let collector = &mut self.sim.collector.style;
        collector.visible = on;
        collector.caption = Some("0".to_string());
        collector.text = self.settings.collector_color;

        if on {
            log::info!("Quiz started ({} questions)", self.content.questions.len());
        } else {
            log::info!("Quiz stopped");
        }
        self.ask_next(scene);
    }

    fn answer(&mut self, scene: &mut Scene<Action>, choice: Choice) {
        let Some(correct) = self.quiz.grade(&self.content.questions, choice) else {
            return;
        };
        log::info!(
            "Question {} answered {}: {}",
            self.quiz.index + 1,
            choice,
            if correct { "correct" } else { "incorrect" }
        );
        let feedback = if correct {
            self.content.correct.clone()
        } else {
            self.content.incorrect.clone()
        };
        self.set_prompt(scene, &feedback);
        self.set_choices_visible(scene, false);

        self.quiz.phase = QuizPhase::Gathering;
        self.quiz.gather_target = Some(Vec2::new(self.viewport.x / 2.0, self.viewport.y / 2.0 - GATHER_OFFSET));
        self.sim.set_gravity_scale(0.0);
    }

    fn drop_balls(&mut self, scene: &mut Scene<Action>) {
        scene.set_visible(self.widgets.drop, false);
        self.sim.set_gravity_scale(1.0);
        self.quiz.gather_target = None;
        if self.quiz.phase != QuizPhase::AwaitingDrop {
            return;
        }
        self.quiz.phase = QuizPhase::Dropping;
        self.queue
            .schedule(self.settings.drop_delay, self.quiz.liveness(), Task::Score);
    }

    /// Freeze the arena and tally the balls touching the collector
    fn score(&mut self) {
        self.sim.set_mode(PhysicsMode::Scoring);
        let color = if self.quiz.correct {
            self.settings.correct_color
        } else {
            self.settings.incorrect_color
        };

        let collected = self.sim.collect();
        let mut delta = 0;
        for &i in &collected {
            let body = &mut self.sim.bodies[i];
            body.style.text = color;
            delta += self.quiz.signed(body.label);
        }
        self.quiz.score += delta;
        self.quiz.collected = collected;
        self.quiz.phase = QuizPhase::Scoring;

        let collector = &mut self.sim.collector.style;
        collector.text = color;
        collector.caption = Some(round_caption(delta, self.quiz.correct));

        log::info!(
            "Round scored: {} balls, delta {}, total {}",
            self.quiz.collected.len(),
            delta,
            self.quiz.score
        );
        self.queue
            .schedule(self.settings.score_delay, self.quiz.liveness(), Task::FinishRound);
    }

    /// Thaw the arena, show the running total and move on
    fn finish_round(&mut self, scene: &mut Scene<Action>) {
        self.sim.set_mode(PhysicsMode::Active);
        for &i in &self.quiz.collected {
            if let Some(body) = self.sim.bodies.get_mut(i) {
                body.style.text = Rgb::WHITE;
            }
        }
        self.quiz.collected.clear();

        let collector = &mut self.sim.collector.style;
        collector.caption = Some(self.quiz.score.to_string());
        collector.text = self.settings.collector_color;

        self.set_choices_visible(scene, true);
        self.quiz.advance();
        self.ask_next(scene);
    }

    /// Run a deferred task that passed its liveness check
    pub fn run_task(&mut self, scene: &mut Scene<Action>, task: Task) {
        match task {
            Task::Score => self.score(),
            Task::FinishRound => self.finish_round(scene),
        }
    }

    fn toggled(scene: &Scene<Action>, fired: &Fired<Action>) -> bool {
        scene.button(fired.node).is_some_and(|b| b.toggled)
    }
}

impl Dispatch<Action> for Logic {
    fn dispatch(&mut self, scene: &mut Scene<Action>, fired: Fired<Action>) {
        match fired.action {
            Action::ReadingClicked => {
                detoggle(scene, self.widgets.game_button, self);
                if let Some(button) = scene.button_mut(fired.node) {
                    button.label = "Reading".to_string();
                }
            }
            Action::ReadingToggled => {
                let on = Self::toggled(scene, &fired);
                self.reading.set_visible(scene, on);
                self.reading.reset_scroll();
            }
            Action::GameClicked => detoggle(scene, self.widgets.reading_button, self),
            Action::GameToggled => {
                let on = Self::toggled(scene, &fired);
                self.toggle_game(scene, on);
            }
            Action::CreditsClicked => {
                let on = Self::toggled(scene, &fired);
                for &id in &self.widgets.credits_items {
                    scene.set_visible(id, on);
                }
            }
            Action::OpenLink(i) => {
                if let Some(link) = self.content.credits.links.get(i) {
                    self.effects.push(Effect::OpenUrl(link.url.clone()));
                }
                detoggle(scene, fired.node, self);
            }
            Action::Answer(choice) => {
                self.answer(scene, choice);
                detoggle(scene, fired.node, self);
            }
            Action::Drop => {
                detoggle(scene, fired.node, self);
                self.drop_balls(scene);
            }
        }
    }
}
