//! # pdfmd
//!
//! Reconstructs structured Markdown from PDF documents.
//!
//! PDF text carries no structure, only positioned fragments. This crate
//! groups fragments into visual lines, infers each page's typographic
//! baselines by frequency analysis, classifies lines as headings, list
//! items, or body text, and assembles a Markdown document with paragraph
//! breaks recovered from vertical whitespace.
//!
//! ## Quick start
//!
//! ```no_run
//! use pdfmd::{convert_file, ConvertOptions};
//!
//! # fn main() -> pdfmd::Result<()> {
//! let result = convert_file("document.pdf", &ConvertOptions::default())?;
//! println!("{}", result.markdown);
//! println!("{} pages, {} words", result.stats.pages, result.stats.words);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom page sources
//!
//! The engine consumes the [`PageSource`] trait rather than PDF bytes, so
//! another backend (or synthetic pages in tests) can drive the same
//! pipeline through [`Converter`].

mod assemble;
mod convert;
mod error;
mod layout;
mod model;
mod options;
mod reader;
mod result;

pub use convert::Converter;
pub use error::{Error, Result};
pub use model::TextFragment;
pub use options::{ConvertOptions, HeadingSensitivity};
pub use reader::{PageSource, PdfReader};
pub use result::{ConvertResult, ConvertStats};

use std::path::Path;

/// Convert an in-memory PDF to Markdown.
pub fn convert_bytes(data: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
    let reader = PdfReader::from_bytes(data)?;
    Ok(Converter::new(reader, options.clone()).run())
}

/// Convert an in-memory PDF, reporting progress as `(page_no, total)`
/// before each page.
pub fn convert_bytes_with_progress<F>(
    data: &[u8],
    options: &ConvertOptions,
    progress: F,
) -> Result<ConvertResult>
where
    F: FnMut(u32, u32),
{
    let reader = PdfReader::from_bytes(data)?;
    Ok(Converter::new(reader, options.clone()).run_with_progress(progress))
}

/// Convert a PDF file to Markdown.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertResult> {
    let reader = PdfReader::open(path)?;
    Ok(Converter::new(reader, options.clone()).run())
}

/// Convert an in-memory PDF, yielding to the async runtime between pages.
///
/// The pipeline itself is synchronous; the yield keeps long documents from
/// monopolizing a runtime worker.
#[cfg(feature = "async")]
pub async fn convert_bytes_async(data: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
    let reader = PdfReader::from_bytes(data)?;
    Ok(Converter::new(reader, options.clone()).run_async().await)
}
