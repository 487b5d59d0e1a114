//! Error types shared by the quiz and the importer.

use thiserror::Error;

/// Errors raised while reading or writing the CSV ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors raised by the quiz session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The tag selection matched no ledger entries, so no word can be drawn.
    #[error("no vocabulary entries match the selected tags")]
    EmptySelection,
}

/// Errors raised by the vocabulary importer.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The tag already has rows in the ledger. Not a failure: nothing to do.
    #[error("tag '{0}' is already present in the ledger")]
    DuplicateTag(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dump file error: {0}")]
    Dump(#[from] std::io::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ImportError {
    /// Exit status for the importer binary. A duplicate tag is not a failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ImportError::DuplicateTag(_) => 0,
            _ => 1,
        }
    }
}
