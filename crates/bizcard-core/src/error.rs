//! Error types for the bizcard-core library.

use thiserror::Error;

/// Main error type for the bizcard library.
#[derive(Error, Debug)]
pub enum BizcardError {
    /// Card extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to card field extraction.
///
/// The heuristic engine itself never fails: an unmatched field is the
/// empty-string sentinel, and a malformed structured guess silently
/// falls back to text parsing. The only error is having no source at
/// all.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The upstream vision call produced neither structure nor text.
    #[error("no text source available")]
    NoSource,
}

/// Result type for the bizcard library.
pub type Result<T> = std::result::Result<T, BizcardError>;
