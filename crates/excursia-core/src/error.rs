//! Error types for the excursia-core library.

use thiserror::Error;

/// Main error type for the excursia library.
#[derive(Error, Debug)]
pub enum ExcursiaError {
    /// Per-page field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Corpus document error.
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while extracting fields from a single page.
///
/// These never abort a corpus run; the aggregator records them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The page's search buffer is larger than the configured limit.
    #[error("search buffer for {address} is {len} chars (limit {limit})")]
    BufferTooLarge {
        address: String,
        len: usize,
        limit: usize,
    },
}

/// Errors related to the corpus document.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// The document could not be parsed as a corpus.
    #[error("failed to parse corpus: {0}")]
    Parse(String),
}

/// Result type for the excursia library.
pub type Result<T> = std::result::Result<T, ExcursiaError>;
