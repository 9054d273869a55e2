//! Quiz Balls entry point
//!
//! On the web this binds the page's canvas, forwards DOM input and drives
//! the presentation from `requestAnimationFrame`. Natively it plays a short
//! scripted session against a recording surface and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

    use quiz_balls::renderer::CanvasSurface;
    use quiz_balls::ui::{Event, EventKind};
    use quiz_balls::{Content, Effect, Presentation, Settings};

    /// Page-side state for one session
    struct Host {
        presentation: Presentation,
        surface: CanvasSurface,
    }

    impl Host {
        /// Keep the canvas the size of the window
        fn fit_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            self.surface.resize(w as u32, h as u32);
        }

        fn frame(&mut self, time: f64) {
            self.fit_window();
            self.presentation.frame(time, &mut self.surface);
            for effect in self.presentation.drain_effects() {
                match effect {
                    Effect::OpenUrl(url) => open_url(&url),
                }
            }
        }

        fn dom_event(&mut self, name: &str, x: f32, y: f32) {
            match EventKind::from_dom(name) {
                Some(kind) => self.presentation.handle_event(Event::new(kind, Vec2::new(x, y))),
                None => log::trace!("Ignored DOM event `{}`", name),
            }
        }
    }

    fn open_url(url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        match window.open_with_url_and_target(url, "_blank") {
            Ok(Some(tab)) => {
                let _ = tab.focus();
            }
            Ok(None) => log::warn!("Popup blocked for {}", url),
            Err(e) => log::warn!("Failed to open {}: {:?}", url, e),
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Trace).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        let settings = Settings::load();
        if let Ok(level) = settings.level_filter() {
            log::set_max_level(level);
        }
        let content = Content::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;

        let mut surface = CanvasSurface::new(canvas.clone()).ok_or("canvas has no 2d context")?;
        let w = window.inner_width()?.as_f64().unwrap_or(0.0);
        let h = window.inner_height()?.as_f64().unwrap_or(0.0);
        surface.resize(w as u32, h as u32);

        let presentation = Presentation::new(settings, content, &mut surface);
        let host = Rc::new(RefCell::new(Host { presentation, surface }));

        setup_input_handlers(&canvas, host.clone());
        request_animation_frame(host);

        log::info!("Quiz Balls running");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        for name in ["mousemove", "mousedown", "mouseup"] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                host.borrow_mut()
                    .dom_event(&event.type_(), event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
            let name = if event.delta_y() < 0.0 { "scrollup" } else { "scrolldown" };
            host.borrow_mut()
                .dom_event(name, event.client_x() as f32, event.client_y() as f32);
        });
        let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            host.borrow_mut().frame(time);
            request_animation_frame(host);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(version, about = "Play a scripted Quiz Balls session headlessly")]
struct Args {
    /// Settings JSON file (defaults are used when omitted or unreadable)
    #[arg(short, long)]
    settings: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Quiz Balls (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to see it in a browser");

    let args = Args::parse();
    let settings = match &args.settings {
        Some(path) => quiz_balls::Settings::load_file(path),
        None => quiz_balls::Settings::default(),
    };
    match quiz_balls::Content::builtin() {
        Ok(content) => {
            let outcome = headless::run(settings, content);
            log::info!("Final phase {:?}, score {}", outcome.phase, outcome.score);
        }
        Err(e) => log::error!("Built-in content rejected: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use quiz_balls::app::QuizPhase;
    use quiz_balls::content::Content;
    use quiz_balls::renderer::RecordingSurface;
    use quiz_balls::ui::{Event, EventKind, NodeId};
    use quiz_balls::{Presentation, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Longest wait for the balls to gather under the prompt
    const GATHER_CAP_SECS: f64 = 20.0;
    /// Longest wait for a dropped round to be scored
    const ROUND_CAP_SECS: f64 = 5.0;

    /// Where the scripted session ended
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Outcome {
        pub phase: QuizPhase,
        pub score: i32,
    }

    struct Session {
        presentation: Presentation,
        surface: RecordingSurface,
        now: f64,
    }

    impl Session {
        fn step(&mut self) {
            self.presentation.frame(self.now, &mut self.surface);
            self.now += FRAME_MS;
        }

        fn run_secs(&mut self, secs: f64) {
            let frames = (secs * 1000.0 / FRAME_MS).ceil() as usize;
            for _ in 0..frames {
                self.step();
            }
        }

        /// Advance frame by frame until `done` holds or `cap` seconds pass
        fn run_until(&mut self, cap: f64, done: impl Fn(QuizPhase) -> bool) -> bool {
            let frames = (cap * 1000.0 / FRAME_MS).ceil() as usize;
            for _ in 0..frames {
                if done(self.presentation.quiz().phase) {
                    return true;
                }
                self.step();
            }
            done(self.presentation.quiz().phase)
        }

        fn click(&mut self, id: NodeId) {
            let at = self.presentation.scene()[id].bounds().center();
            for kind in [EventKind::PointerMove, EventKind::PointerDown, EventKind::PointerUp] {
                self.presentation.handle_event(Event::new(kind, at));
            }
        }
    }

    /// Answer every question correctly, dropping the balls each round
    pub fn run(settings: Settings, content: Content) -> Outcome {
        let answers: Vec<_> = content.questions.iter().map(|q| q.answer).collect();
        let mut surface = RecordingSurface::new(Vec2::new(1280.0, 720.0));
        let presentation = Presentation::new(settings, content, &mut surface);
        let mut session = Session {
            presentation,
            surface,
            now: 0.0,
        };

        session.run_secs(2.0);
        let widgets = session.presentation.widgets().clone();
        session.click(widgets.game_button);

        for (round, answer) in answers.into_iter().enumerate() {
            session.run_secs(0.1);
            session.click(widgets.choice(answer));
            if !session.run_until(GATHER_CAP_SECS, |phase| phase == QuizPhase::AwaitingDrop) {
                log::warn!("Balls never gathered in round {}; stopping", round + 1);
                break;
            }
            session.click(widgets.drop);
            let scored = session.run_until(ROUND_CAP_SECS, |phase| {
                matches!(phase, QuizPhase::Asking | QuizPhase::Finished)
            });
            if !scored {
                log::warn!("Round {} was never scored; stopping", round + 1);
                break;
            }
        }

        let quiz = session.presentation.quiz();
        let settled = session
            .presentation
            .sim()
            .bodies
            .iter()
            .filter(|b| b.vel.length() <= quiz_balls::consts::SETTLE_SPEED)
            .count();
        log::info!(
            "Headless session done: phase {:?}, score {}, {}/{} balls settled, {} draw calls in the last frame",
            quiz.phase,
            quiz.score,
            settled,
            session.presentation.sim().bodies.len(),
            session.surface.commands().len()
        );
        Outcome {
            phase: quiz.phase,
            score: quiz.score,
        }
    }

}
