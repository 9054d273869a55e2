//! Canvas 2D surface (WASM only)

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::color::Rgb;
use crate::geom::Rect;
use crate::ui::{TextMeasure, TextMetrics};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to a canvas element's 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Match the backing store to the given CSS size
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width {
            self.canvas.set_width(width);
        }
        if self.canvas.height() != height {
            self.canvas.set_height(height);
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl TextMeasure for CanvasSurface {
    fn measure(&mut self, font: &str, text: &str) -> TextMetrics {
        self.ctx.set_font(font);
        match self.ctx.measure_text(text) {
            Ok(m) => TextMetrics {
                width: m.width() as f32,
                ascent: m.actual_bounding_box_ascent() as f32,
                descent: m.actual_bounding_box_descent() as f32,
            },
            Err(_) => TextMetrics::default(),
        }
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let size = self.viewport();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(
            rect.origin.x as f64,
            rect.origin.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.ctx.set_stroke_style_str(&color.to_hex());
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Rgb, max_width: Option<f32>) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(&color.to_hex());
        let _ = match max_width {
            Some(w) => self
                .ctx
                .fill_text_with_max_width(text, pos.x as f64, pos.y as f64, w.max(0.0) as f64),
            None => self.ctx.fill_text(text, pos.x as f64, pos.y as f64),
        };
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn rotate_about(&mut self, center: Vec2, angle: f32) {
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(angle as f64);
        let _ = self.ctx.translate(-center.x as f64, -center.y as f64);
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }
}
