//! Error types for word-finder
//!
//! Every failure is detected before a scan starts (except cancellation), so a
//! query either runs to completion or is refused up front.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the word store, criteria compilation and search engine
#[derive(Error, Debug)]
pub enum FinderError {
    /// The word file is missing or cannot be opened
    #[error("Word file not found at: {path:?}")]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bad length range or an empty search request
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed regular expression, rejected at compile time
    #[error("Invalid regex pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// I/O failure after the word file was opened
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scan was aborted through a cancel token
    #[error("Search cancelled")]
    Cancelled,
}

impl FinderError {
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
