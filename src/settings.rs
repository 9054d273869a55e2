//! Presentation settings
//!
//! Every field has a default, so a settings document only needs the keys it
//! changes. On the web the host reads an optional inline JSON block; nothing
//! is ever written back.

use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::sim::StackSpec;
use crate::ui::ButtonPalette;

/// Tunable presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the cosmetic spin of each ball
    pub seed: u64,
    /// Opening ball stack
    pub stack: StackSpec,

    // === Reading pane ===
    /// Scroll offset change per wheel notch
    pub scroll_step: f32,
    /// Force applied to every ball per wheel notch
    pub scroll_impulse: f32,
    /// Top-left of the first paragraph
    pub reading_origin: Vec2,
    /// Vertical gap between paragraphs
    pub paragraph_gap: f32,
    /// Font for paragraphs and the quiz prompt
    pub font: String,
    /// Fraction of the scroll error left after one second
    pub scroll_decay: f32,

    // === Colors ===
    pub text_color: Rgb,
    pub button_neutral: Rgb,
    pub button_toggled: Rgb,
    pub button_accent: Rgb,
    /// Collector caption while idle
    pub collector_color: Rgb,
    /// Collected balls after a correct answer
    pub correct_color: Rgb,
    /// Collected balls after an incorrect answer
    pub incorrect_color: Rgb,

    // === Quiz timing ===
    /// Fraction of the distance to the gather point left after one second
    pub gather_decay: f32,
    /// Seconds between pressing Drop and scoring
    pub drop_delay: f64,
    /// Seconds the round delta stays on the collector
    pub score_delay: f64,

    // === Frame driver ===
    /// Upper bound on a single frame's delta (seconds)
    pub max_frame_dt: f32,
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed_ba11,
            stack: StackSpec::default(),

            scroll_step: 40.0,
            scroll_impulse: 175.0,
            reading_origin: Vec2::new(30.0, 200.0),
            paragraph_gap: 15.0,
            font: "16pt Arial".to_string(),
            scroll_decay: 0.0001,

            text_color: Rgb::BLACK,
            button_neutral: Rgb::BLACK,
            button_toggled: Rgb::MINT,
            button_accent: Rgb::VIOLET,
            collector_color: Rgb::BLUE,
            correct_color: Rgb::GREEN,
            incorrect_color: Rgb::RED,

            gather_decay: 0.1,
            drop_delay: 1.0,
            score_delay: 0.75,

            max_frame_dt: 0.1,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate a settings document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the presentation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
            Error::InvalidSetting {
                field,
                reason: reason.into(),
            }
        }

        if self.stack.rows == 0 || self.stack.rows > 64 {
            return Err(invalid("stack.rows", format!("{} is outside 1..=64", self.stack.rows)));
        }
        if !(self.stack.base_radius > 0.0) || self.stack.radius_step < 0.0 {
            return Err(invalid("stack.base_radius", "ball radii must be positive"));
        }
        if !(self.stack.spin >= 0.0) {
            return Err(invalid("stack.spin", "must be non-negative"));
        }
        if !(self.scroll_step > 0.0) {
            return Err(invalid("scroll_step", "must be positive"));
        }
        for (field, decay) in [("scroll_decay", self.scroll_decay), ("gather_decay", self.gather_decay)] {
            if !(decay > 0.0 && decay < 1.0) {
                return Err(invalid(field, format!("{decay} is outside (0, 1)")));
            }
        }
        if !(self.drop_delay >= 0.0) || !(self.score_delay >= 0.0) {
            return Err(invalid("drop_delay", "delays must be non-negative"));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(invalid("max_frame_dt", "must be positive"));
        }
        if self.font.trim().is_empty() {
            return Err(invalid("font", "must not be empty"));
        }
        self.level_filter()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.log_level).map_err(|_| Error::InvalidSetting {
            field: "log_level",
            reason: format!("unknown level `{}`", self.log_level),
        })
    }

    /// Colors shared by every button
    pub fn palette(&self) -> ButtonPalette {
        ButtonPalette {
            neutral: self.button_neutral,
            toggled: self.button_toggled,
            accent: self.button_accent,
        }
    }

    /// Id of the optional inline settings element
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "settings";

    /// Load settings from the page's `#settings` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|e| e.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring #{}: {}", Self::ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    /// Read and validate settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
