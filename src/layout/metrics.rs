//! Per-page typographic baselines inferred by frequency analysis.

use std::collections::BTreeMap;

use crate::model::{Line, TextFragment};

/// Font size assumed when a page has no fragments to measure.
const FALLBACK_FONT_SIZE: f32 = 12.0;

/// The page's inferred body-text font size and left margin.
///
/// Both are modal values over small bounded domains (practical font sizes,
/// pixel-ish indents), so a plain rounded-value frequency table with one
/// linear scan is enough.
#[derive(Debug, Clone)]
pub struct PageMetrics {
    /// Body-text font size: the rounded size covering the most characters
    pub base_font_size: f32,
    /// Dominant left margin: the most frequent rounded line `min_x`
    pub base_indent: f32,
}

impl PageMetrics {
    /// Measure a page from its raw fragments and grouped lines.
    pub fn analyze(fragments: &[TextFragment], lines: &[Line]) -> Self {
        Self {
            base_font_size: dominant_font_size(fragments),
            base_indent: dominant_indent(lines),
        }
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self {
            base_font_size: FALLBACK_FONT_SIZE,
            base_indent: 0.0,
        }
    }
}

/// The rounded font size that covers the most characters on the page.
///
/// Weighting by character count rather than fragment count keeps a page of
/// short large headings from having its body size mis-read as the heading
/// size.
fn dominant_font_size(fragments: &[TextFragment]) -> f32 {
    let mut histogram: BTreeMap<i32, usize> = BTreeMap::new();
    for fragment in fragments {
        let chars = fragment.char_count();
        if chars > 0 {
            *histogram.entry(fragment.font_size.round() as i32).or_insert(0) += chars;
        }
    }

    let size = modal_key(&histogram).map(|k| k as f32);
    match size {
        Some(s) if s > 0.0 => s,
        _ => FALLBACK_FONT_SIZE,
    }
}

/// The most frequent rounded `min_x` among the page's lines.
fn dominant_indent(lines: &[Line]) -> f32 {
    let mut histogram: BTreeMap<i32, usize> = BTreeMap::new();
    for line in lines {
        *histogram.entry(line.min_x.round() as i32).or_insert(0) += 1;
    }
    modal_key(&histogram).map(|k| k as f32).unwrap_or(0.0)
}

/// Key with the highest accumulated weight. Ties resolve to the smallest
/// key, which keeps the result deterministic.
fn modal_key(histogram: &BTreeMap<i32, usize>) -> Option<i32> {
    let mut best: Option<(i32, usize)> = None;
    for (&key, &weight) in histogram {
        match best {
            Some((_, w)) if weight <= w => {}
            _ => best = Some((key, weight)),
        }
    }
    best.map(|(k, _)| k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::group_into_lines;

    fn frag(text: &str, x: f32, y: f32, size: f32) -> TextFragment {
        TextFragment::new(text, x, y, size, "Helvetica")
    }

    #[test]
    fn test_empty_page_falls_back() {
        let metrics = PageMetrics::analyze(&[], &[]);
        assert_eq!(metrics.base_font_size, FALLBACK_FONT_SIZE);
        assert_eq!(metrics.base_indent, 0.0);
    }

    #[test]
    fn test_char_count_weighting() {
        // A 30pt title with 5 characters must not out-vote 40 characters of
        // 12pt body text.
        let fragments = vec![
            frag("Title", 0.0, 200.0, 30.0),
            frag("a long paragraph of body", 0.0, 180.0, 12.0),
            frag("and another one", 0.0, 160.0, 12.0),
        ];
        let metrics = PageMetrics::analyze(&fragments, &[]);
        assert_eq!(metrics.base_font_size, 12.0);
    }

    #[test]
    fn test_lone_heading_sets_its_own_baseline() {
        let fragments = vec![frag("Title", 0.0, 100.0, 24.0)];
        let metrics = PageMetrics::analyze(&fragments, &[]);
        assert_eq!(metrics.base_font_size, 24.0);
    }

    #[test]
    fn test_modal_indent() {
        let fragments = vec![
            frag("one", 72.0, 200.0, 12.0),
            frag("two", 72.0, 180.0, 12.0),
            frag("three", 100.0, 160.0, 12.0),
            frag("four", 72.0, 140.0, 12.0),
        ];
        let lines = group_into_lines(fragments.clone(), 3.0);
        let metrics = PageMetrics::analyze(&fragments, &lines);
        assert_eq!(metrics.base_indent, 72.0);
    }

    #[test]
    fn test_size_rounding_merges_near_sizes() {
        let fragments = vec![
            frag("aaaa", 0.0, 200.0, 11.9),
            frag("bbbb", 0.0, 180.0, 12.1),
            frag("cc", 0.0, 160.0, 18.0),
        ];
        let metrics = PageMetrics::analyze(&fragments, &[]);
        assert_eq!(metrics.base_font_size, 12.0);
    }
}
