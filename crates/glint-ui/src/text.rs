/// Measurement oracle for text content.
///
/// The runtime never rasterizes text itself; a backend supplies these two
/// queries and the text layout rule decides between the single-line and
/// wrapped shapes from their answers.
pub trait TextMetrics {
    /// Width the text would take on a single unwrapped line.
    fn unbounded_width(&self, content: &str, font_size: f32, max_height: f32) -> f32;

    /// Height the text takes when wrapped to the given width.
    fn height_for_width(&self, content: &str, font_size: f32, width: f32) -> f32;
}

/// Deterministic metrics for a fixed-advance font. Used as the default
/// oracle and by tests that assert exact frames.
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance_ratio: f32,
    /// Line height as a fraction of the font size.
    pub line_ratio: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_ratio: 1.2,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn unbounded_width(&self, content: &str, font_size: f32, _max_height: f32) -> f32 {
        content.chars().count() as f32 * font_size * self.advance_ratio
    }

    fn height_for_width(&self, content: &str, font_size: f32, width: f32) -> f32 {
        let advance = font_size * self.advance_ratio;
        let per_line = if advance > 0.0 && width > 0.0 {
            (width / advance).floor().max(1.0)
        } else {
            1.0
        };
        let chars = content.chars().count() as f32;
        let lines = (chars / per_line).ceil().max(1.0);
        lines * font_size * self.line_ratio
    }
}
