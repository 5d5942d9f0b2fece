//! Assembly of classified lines into a flowing Markdown document.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::ClassifiedLine;
use crate::result::ConvertStats;

/// Gap multiplier over the base font size that signals a paragraph break.
const PARAGRAPH_GAP_FACTOR: f32 = 1.5;

/// Accumulates one page's classified lines into Markdown, tracking the
/// vertical position of the previously emitted line for the paragraph-break
/// heuristic.
pub struct PageAssembler<'a> {
    base_font_size: f32,
    stats: &'a mut ConvertStats,
    out: String,
    prev_y: Option<f32>,
    prev_was_list: bool,
}

impl<'a> PageAssembler<'a> {
    /// Start assembling a page.
    pub fn new(base_font_size: f32, stats: &'a mut ConvertStats) -> Self {
        Self {
            base_font_size,
            stats,
            out: String::new(),
            prev_y: None,
            prev_was_list: false,
        }
    }

    /// Append one classified line.
    ///
    /// Empty lines are dropped entirely; they do not update the previous
    /// position, so they stay invisible to the gap calculation.
    pub fn push(&mut self, line: &ClassifiedLine) {
        if line.is_empty() {
            return;
        }

        if let Some(prev_y) = self.prev_y {
            let gap = prev_y - line.y;
            let continues_list = line.is_list && self.prev_was_list;
            if !line.is_heading
                && gap > PARAGRAPH_GAP_FACTOR * self.base_font_size
                && !continues_list
            {
                self.out.push('\n');
            }
        }

        self.out.push_str(&line.text);
        self.out.push('\n');

        self.stats.record_line(&line.text, line.is_heading, line.is_list);
        self.prev_y = Some(line.y);
        self.prev_was_list = line.is_list;
    }

    /// Finish the page, returning its trimmed Markdown fragment.
    pub fn finish(self) -> String {
        self.out.trim().to_string()
    }
}

/// Join per-page Markdown fragments into the final document.
///
/// Pages that produced no text are skipped. With `page_breaks`, a
/// horizontal rule surrounded by blank lines separates consecutive emitted
/// pages; it never appears before the first or after the last.
pub fn join_pages(pages: Vec<String>, page_breaks: bool) -> String {
    let separator = if page_breaks { "\n\n---\n\n" } else { "\n\n" };
    let joined = pages
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(separator);
    normalize_output(&joined)
}

/// Final cleanup: NFC normalization plus collapsing runs of blank lines.
fn normalize_output(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    let collapsed = Regex::new(r"\n{3,}").unwrap().replace_all(&normalized, "\n\n");
    collapsed.trim().to_string()
}
