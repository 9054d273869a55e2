//! Headless surface that records draw calls
//!
//! Glyph metrics are fixed per character so wrapping and centring are
//! deterministic without a font stack.

use glam::Vec2;

use super::Surface;
use crate::color::Rgb;
use crate::geom::Rect;
use crate::ui::{TextMeasure, TextMetrics};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    Rect {
        rect: Rect,
        color: Rgb,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
        outline: bool,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        color: Rgb,
        max_width: Option<f32>,
    },
    Rotate {
        center: Vec2,
        angle: f32,
    },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    viewport: Vec2,
    /// Advance width of every glyph
    pub glyph_width: f32,
    pub ascent: f32,
    pub descent: f32,
    commands: Vec<DrawCmd>,
    depth: usize,
}

impl RecordingSurface {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            glyph_width: 8.0,
            ascent: 12.0,
            descent: 4.0,
            commands: Vec::new(),
            depth: 0,
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Every string drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Unbalanced `save` calls so far
    pub fn save_depth(&self) -> usize {
        self.depth
    }
}

impl TextMeasure for RecordingSurface {
    fn measure(&mut self, _font: &str, text: &str) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * self.glyph_width,
            ascent: self.ascent,
            descent: self.descent,
        }
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> Vec2 {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCmd::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            outline: false,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            outline: true,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Rgb, max_width: Option<f32>) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            color,
            max_width,
        });
    }

    fn save(&mut self) {
        self.depth += 1;
    }

    fn rotate_about(&mut self, center: Vec2, angle: f32) {
        self.commands.push(DrawCmd::Rotate { center, angle });
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
