//! The conversion pipeline: pages in, Markdown document out.

use crate::assemble::{join_pages, PageAssembler};
use crate::layout::{group_into_lines, LineClassifier, PageMetrics};
use crate::options::ConvertOptions;
use crate::reader::PageSource;
use crate::result::{ConvertResult, ConvertStats};

/// Drives the per-page pipeline over a [`PageSource`] and assembles the
/// final document.
///
/// Pages are processed strictly in order, one at a time; each page's layout
/// analysis is independent of every other page's.
pub struct Converter<S: PageSource> {
    source: S,
    options: ConvertOptions,
}

impl<S: PageSource> Converter<S> {
    /// Create a converter over a page source.
    pub fn new(source: S, options: ConvertOptions) -> Self {
        Self { source, options }
    }

    /// Convert the whole document.
    pub fn run(&self) -> ConvertResult {
        self.run_with_progress(|_, _| {})
    }

    /// Convert with a progress callback, invoked as `(page_no, total)`
    /// before each page is processed. Pages are 1-indexed.
    pub fn run_with_progress<F>(&self, mut progress: F) -> ConvertResult
    where
        F: FnMut(u32, u32),
    {
        let total = self.source.page_count();
        let mut stats = ConvertStats::new();
        stats.pages = total;

        let classifier = LineClassifier::new(&self.options);
        let mut pages = Vec::with_capacity(total as usize);
        for page_no in 1..=total {
            progress(page_no, total);
            pages.push(self.render_page(page_no, &classifier, &mut stats));
        }

        ConvertResult::new(join_pages(pages, self.options.page_breaks), stats)
    }

    /// Convert the whole document, yielding to the runtime between pages.
    ///
    /// The per-page work is synchronous; the yield keeps long documents
    /// from monopolizing a runtime worker.
    #[cfg(feature = "async")]
    pub async fn run_async(&self) -> ConvertResult {
        let total = self.source.page_count();
        let mut stats = ConvertStats::new();
        stats.pages = total;

        let classifier = LineClassifier::new(&self.options);
        let mut pages = Vec::with_capacity(total as usize);
        for page_no in 1..=total {
            pages.push(self.render_page(page_no, &classifier, &mut stats));
            tokio::task::yield_now().await;
        }

        ConvertResult::new(join_pages(pages, self.options.page_breaks), stats)
    }

    /// Render one page to its Markdown fragment.
    ///
    /// A page whose extraction fails contributes nothing to the output; the
    /// conversion as a whole still succeeds.
    fn render_page(
        &self,
        page_no: u32,
        classifier: &LineClassifier,
        stats: &mut ConvertStats,
    ) -> String {
        let fragments = match self.source.page_fragments(page_no) {
            Ok(fragments) => fragments,
            Err(err) => {
                log::warn!("skipping page {}: {}", page_no, err);
                return String::new();
            }
        };
        if fragments.is_empty() {
            return String::new();
        }

        let lines = group_into_lines(fragments.clone(), self.options.line_tolerance);
        let metrics = PageMetrics::analyze(&fragments, &lines);

        let mut page = PageAssembler::new(metrics.base_font_size, stats);
        for line in &lines {
            page.push(&classifier.classify(line, &metrics));
        }
        page.finish()
    }

    /// The options this converter was built with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }
}
