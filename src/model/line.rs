//! Visual text lines reconstructed from fragment geometry.

use super::TextFragment;

/// A geometrically clustered, reading-order-sorted run of fragments believed
/// to lie on one visual text line.
///
/// Invariants: `fragments` are sorted ascending by `x`; `y` is the vertical
/// position of the fragment that anchored the cluster; `min_x` is the
/// smallest fragment `x` and serves as the line's indentation level.
#[derive(Debug, Clone)]
pub struct Line {
    /// Fragments in left-to-right order
    pub fragments: Vec<TextFragment>,
    /// Representative vertical position (the cluster anchor)
    pub y: f32,
    /// Leftmost X position
    pub min_x: f32,
}

impl Line {
    /// Build a line from the fragments of one vertical cluster.
    ///
    /// `anchor_y` is the position of the fragment that opened the cluster.
    pub fn from_fragments(mut fragments: Vec<TextFragment>, anchor_y: f32) -> Self {
        fragments.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        let min_x = fragments
            .iter()
            .map(|f| f.x)
            .fold(f32::INFINITY, f32::min);

        Self {
            fragments,
            y: anchor_y,
            min_x: if min_x.is_finite() { min_x } else { 0.0 },
        }
    }

    /// Concatenated raw text of all fragments, without any markup.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Character-count-weighted average font size.
    ///
    /// Weighting by characters rather than fragments keeps a line with one
    /// long body-text run and a few stray large glyphs from reading as a
    /// heading.
    pub fn average_font_size(&self) -> f32 {
        let total_chars: usize = self.fragments.iter().map(|f| f.char_count()).sum();
        if total_chars == 0 {
            return self.fragments.first().map(|f| f.font_size).unwrap_or(0.0);
        }
        let weighted: f32 = self
            .fragments
            .iter()
            .map(|f| f.font_size * f.char_count() as f32)
            .sum();
        weighted / total_chars as f32
    }

    /// Check that the line has no visible content.
    pub fn is_blank(&self) -> bool {
        self.fragments.iter().all(|f| f.text.trim().is_empty())
    }
}

/// A line after classification: rendered text with inline markup, plus the
/// flags that drive paragraph-break and statistics logic. Not persisted
/// beyond assembly.
#[derive(Debug, Clone)]
pub struct ClassifiedLine {
    /// Rendered text, including any heading/list prefix and emphasis markup
    pub text: String,
    /// Whether the line was classified as a heading
    pub is_heading: bool,
    /// Whether the line was classified as a list item
    pub is_list: bool,
    /// Vertical position, carried through for the assembler's gap rule
    pub y: f32,
}

impl ClassifiedLine {
    /// An empty classification; the assembler drops these entirely.
    pub fn empty(y: f32) -> Self {
        Self {
            text: String::new(),
            is_heading: false,
            is_list: false,
            y,
        }
    }

    /// Whether the assembler should skip this line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
