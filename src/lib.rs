//! Quiz Balls - a canvas presentation with a reading pane, a quiz, and a ball pit
//!
//! Core modules:
//! - `sim`: Ball physics (force integration, pairwise collisions, boundary confinement)
//! - `ui`: Retained scene graph, container layout, hover/press/toggle input handling
//! - `schedule`: Deferred one-shot tasks keyed by logical time
//! - `renderer`: Drawing-surface abstraction (Canvas 2D on the web, recording surface headless)
//! - `app`: Frame driver and presentation logic (quiz, reading pane, credits)
//! - `settings` / `content`: Data-driven configuration

pub mod app;
pub mod color;
pub mod content;
pub mod error;
pub mod geom;
pub mod renderer;
pub mod schedule;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{Action, Effect, Presentation};
pub use color::Rgb;
pub use content::Content;
pub use error::{Error, Result};
pub use settings::Settings;

/// Simulation and presentation constants
pub mod consts {
    /// Downward gravity force applied every step (scaled by a body's gravity factor)
    pub const GRAVITY_FORCE: f32 = 10.0;
    /// Linear drag force opposing velocity
    pub const DRAG_FORCE: f32 = 3.0;
    /// Corrective force per unit of speed along the resolution vector
    pub const CORRECTIVE_FACTOR: f32 = 1.1;
    /// Share of the other body's speed absorbed on collision
    pub const IMPULSE_TRANSFER: f32 = 0.1;
    /// Bodies at or below this speed do not translate by velocity
    pub const SETTLE_SPEED: f32 = 50.0;
    /// Radius that receives unscaled force (mass ∝ radius / this)
    pub const UNIT_MASS_RADIUS: f32 = 10.0;

    /// Button press/release color step
    pub const PRESS_STEP: u8 = 25;
    /// Button hover color step
    pub const HOVER_STEP: u8 = 50;
    /// Horizontal padding inside a button label
    pub const BUTTON_MARGIN: f32 = 10.0;

    /// Gap between wrapped lines of a text item
    pub const LINE_GAP: f32 = 5.0;
    /// Reading pane wrap width is the viewport width minus this
    pub const READING_RIGHT_INSET: f32 = 30.0;
    /// Wrap width of the quiz prompt
    pub const PROMPT_WRAP_WIDTH: f32 = 400.0;

    /// Collector ("game ball") radius
    pub const COLLECTOR_RADIUS: f32 = 50.0;
    /// Drop button edge length
    pub const DROP_BUTTON_SIZE: f32 = 100.0;
    /// Answer grid (two columns of two)
    pub const CHOICE_GRID_WIDTH: f32 = 200.0;
    pub const CHOICE_GRID_HEIGHT: f32 = 100.0;
    /// Top navigation height
    pub const NAV_HEIGHT: f32 = 100.0;
    /// Maximum height of the credits column
    pub const CREDITS_MAX_HEIGHT: f32 = 800.0;
}

/// Font descriptor for a pixel size (`"16px Arial"`)
#[inline]
pub fn px_font(size: f32) -> String {
    format!("{size}px Arial")
}
