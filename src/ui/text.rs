//! Text measurement and line wrapping
//!
//! Measurement comes from the drawing surface; wrapping is a greedy
//! character-drop fit against a maximum line width.

/// Extents of a rendered string
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    pub descent: f32,
}

impl TextMetrics {
    #[inline]
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// Anything that can measure a string in a given font
pub trait TextMeasure {
    fn measure(&mut self, font: &str, text: &str) -> TextMetrics;
}

/// Maximum wrap passes per source line before the remainder is emitted as-is
const MAX_WRAP_PASSES: usize = 12;

/// Split `text` on newlines, then break each line so it fits `max_width`.
///
/// Lines are cut at the longest fitting character prefix (no word
/// boundaries). A single glyph wider than `max_width` still gets its own line.
pub fn wrap_lines(measure: &mut dyn TextMeasure, font: &str, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for source in text.split('\n') {
        let mut rest: Vec<char> = source.chars().collect();
        let mut passes = 0;
        while passes < MAX_WRAP_PASSES && width_of(measure, font, &rest) > max_width {
            let mut cut = rest.len();
            while cut > 1 && width_of(measure, font, &rest[..cut]) > max_width {
                cut -= 1;
            }
            if cut == rest.len() {
                break;
            }
            lines.push(rest[..cut].iter().collect());
            rest = rest.split_off(cut);
            passes += 1;
        }
        lines.push(rest.into_iter().collect());
    }
    lines
}

fn width_of(measure: &mut dyn TextMeasure, font: &str, chars: &[char]) -> f32 {
    let s: String = chars.iter().collect();
    measure.measure(font, &s).width
}

/// Bounding size of wrapped lines stacked with `line_gap` between them
pub fn block_size(measure: &mut dyn TextMeasure, font: &str, lines: &[String], line_gap: f32) -> (f32, f32) {
    let mut width: f32 = 0.0;
    let mut height = 0.0;
    for (i, line) in lines.iter().enumerate() {
        let metrics = measure.measure(font, line);
        width = width.max(metrics.width);
        height += metrics.height();
        if i + 1 != lines.len() {
            height += line_gap;
        }
    }
    (width, height)
}
