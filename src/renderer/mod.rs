//! Drawing surface abstraction
//!
//! The presentation never talks to a graphics API directly. It draws through
//! [`Surface`], which the web host backs with a Canvas 2D context and tests
//! back with [`RecordingSurface`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod draw;
pub mod recording;

use glam::Vec2;

use crate::color::Rgb;
use crate::geom::Rect;
use crate::ui::{TextMeasure, TextMetrics};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use draw::draw_scene;
pub use recording::{DrawCmd, RecordingSurface};

/// A 2D drawing target that can also measure text
pub trait Surface: TextMeasure {
    /// Current drawable size in pixels
    fn viewport(&self) -> Vec2;

    /// Erase the whole surface
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    /// Draw one line of text with its baseline starting at `pos`.
    ///
    /// With `max_width` the line is squeezed horizontally to fit.
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, color: Rgb, max_width: Option<f32>);

    /// Push the current transform
    fn save(&mut self) {}

    /// Rotate subsequent drawing by `angle` radians around `center`
    fn rotate_about(&mut self, _center: Vec2, _angle: f32) {}

    /// Pop the transform pushed by [`Surface::save`]
    fn restore(&mut self) {}
}

/// Lends a surface's text metrics to code that only measures
pub struct SurfaceMeasure<'a>(pub &'a mut dyn Surface);

impl TextMeasure for SurfaceMeasure<'_> {
    fn measure(&mut self, font: &str, text: &str) -> TextMetrics {
        self.0.measure(font, text)
    }
}
