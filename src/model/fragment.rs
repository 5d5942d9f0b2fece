//! Positioned text fragments as emitted by the content-stream reader.

/// A single run of text with geometry and a font-style hint.
///
/// Fragments use PDF coordinate space: larger `y` means higher on the page.
/// They are immutable once created; the page-level collection owns them and
/// lines borrow from it.
#[derive(Debug, Clone)]
pub struct TextFragment {
    /// The decoded text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Rendered width
    pub width: f32,
    /// Rendered height
    pub height: f32,
    /// Effective font size, scaled by the text matrix
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold"), used only as a style hint
    pub font_name: String,
    /// Whether the font name suggests bold weight
    pub is_bold: bool,
    /// Whether the font name suggests italic/oblique slant
    pub is_italic: bool,
}

impl TextFragment {
    /// Create a new fragment, deriving the bold/italic hints from the font name.
    pub fn new(
        text: impl Into<String>,
        x: f32,
        y: f32,
        font_size: f32,
        font_name: impl Into<String>,
    ) -> Self {
        let text = text.into();
        let font_name = font_name.into();
        let lower = font_name.to_lowercase();
        let is_bold =
            lower.contains("bold") || lower.contains("heavy") || lower.contains("black");
        let is_italic = lower.contains("italic") || lower.contains("oblique");

        // Width is an estimate; the grouping and classification passes only
        // need x/y/font_size, so a rough advance is enough.
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            x,
            y,
            width,
            height: font_size,
            font_size,
            font_name,
            is_bold,
            is_italic,
        }
    }

    /// Override the estimated width with a measured one.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Number of characters in this fragment.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
