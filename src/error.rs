//! Error types for the pdfmd library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfmd operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be parsed at all.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// The document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// An unrecognized heading sensitivity name was supplied at a string
    /// boundary (CLI, config). The core API uses a closed enum and cannot
    /// produce this.
    #[error("Unknown heading sensitivity: {0} (expected low, medium, or high)")]
    UnknownSensitivity(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
