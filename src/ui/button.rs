//! Interactive toggle button
//!
//! Hover (`entered`) and `toggled` are independent axes. Every visual
//! transition nudges the body color by a fixed saturating step.

use crate::color::Rgb;
use crate::consts::{HOVER_STEP, PRESS_STEP};

/// Colors a button moves between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPalette {
    /// Body color when not toggled
    pub neutral: Rgb,
    /// Body color right after toggling on
    pub toggled: Rgb,
    /// Label color
    pub accent: Rgb,
}

impl Default for ButtonPalette {
    fn default() -> Self {
        Self {
            neutral: Rgb::BLACK,
            toggled: Rgb::MINT,
            accent: Rgb::VIOLET,
        }
    }
}

/// Leaf control with click and toggle-change handlers.
///
/// Handlers are action values of the scene's action type; `None` is a no-op.
#[derive(Debug, Clone)]
pub struct Button<A> {
    pub label: String,
    pub body: Rgb,
    pub palette: ButtonPalette,
    pub toggled: bool,
    pub entered: bool,
    pub on_click: Option<A>,
    pub on_toggle: Option<A>,
}

impl<A> Button<A> {
    pub fn new(label: impl Into<String>) -> Self {
        let palette = ButtonPalette::default();
        Self {
            label: label.into(),
            body: palette.neutral,
            palette,
            toggled: false,
            entered: false,
            on_click: None,
            on_toggle: None,
        }
    }

    pub fn with_palette(mut self, palette: ButtonPalette) -> Self {
        self.body = palette.neutral;
        self.palette = palette;
        self
    }

    pub fn on_click(mut self, action: A) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn on_toggle(mut self, action: A) -> Self {
        self.on_toggle = Some(action);
        self
    }

    pub fn set_on_click(&mut self, action: Option<A>) {
        self.on_click = action;
    }

    pub fn set_on_toggle(&mut self, action: Option<A>) {
        self.on_toggle = action;
    }

    /// Pointer moved over the button
    pub fn enter(&mut self) {
        self.entered = true;
        self.body = self.body.lighten(HOVER_STEP);
    }

    /// Pointer left the button
    pub fn exit(&mut self) {
        self.entered = false;
        self.body = self.body.darken(HOVER_STEP);
    }

    /// Pointer went down over the button
    pub fn press(&mut self) {
        self.body = self.body.darken(PRESS_STEP);
    }

    /// Pointer came up after a press (inside or outside)
    pub fn release(&mut self) {
        if self.toggled {
            self.body = self.body.lighten(PRESS_STEP);
        } else {
            self.body = self.palette.neutral;
        }
    }

    /// Flip the toggle and re-apply hover feedback
    pub fn click(&mut self) {
        self.toggled = !self.toggled;
        self.body = if self.toggled {
            self.palette.toggled
        } else {
            self.palette.neutral
        };
        self.enter();
    }

    /// Force back to neutral. Returns whether the button was toggled.
    pub fn detoggle(&mut self) -> bool {
        if !self.toggled {
            return false;
        }
        self.toggled = false;
        self.body = self.palette.neutral;
        true
    }
}
