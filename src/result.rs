//! Conversion result and accuracy statistics.

use serde::{Deserialize, Serialize};

/// The sole output of a conversion. Created once at the end of processing
/// and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertResult {
    /// The reconstructed Markdown document
    pub markdown: String,

    /// Aggregate statistics over the whole document
    pub stats: ConvertStats,
}

impl ConvertResult {
    /// Create a new result.
    pub fn new(markdown: String, stats: ConvertStats) -> Self {
        Self { markdown, stats }
    }

    /// Length of the Markdown output in bytes.
    pub fn markdown_len(&self) -> usize {
        self.markdown.len()
    }
}

/// Statistics accumulated while assembling the document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConvertStats {
    /// Total number of pages in the document, including pages that yielded
    /// no text
    pub pages: u32,

    /// Approximate word count: whitespace-delimited tokens in emitted lines,
    /// markup characters included
    pub words: u32,

    /// Number of lines classified as headings
    pub headings: u32,

    /// Number of lines classified as list items
    pub lists: u32,
}

impl ConvertStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emitted line's tokens and classification flags.
    pub fn record_line(&mut self, text: &str, is_heading: bool, is_list: bool) {
        self.words += text.split_whitespace().count() as u32;
        if is_heading {
            self.headings += 1;
        }
        if is_list {
            self.lists += 1;
        }
    }
}
