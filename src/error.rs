use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type StgResult<T> = Result<T, Box<dyn std::error::Error>>;

pub type RunResult<T> = Result<T, RunError>;

/// Reasons a single run stops early. Each one becomes a message for the user.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Invalid YouTube URL: {0:?}")]
    InvalidReference(String),

    #[error("Missing input: {0}")]
    MissingInput(&'static str),

    #[error("Transcription failed: {0}")]
    TranscriptionFailure(String),

    #[error("Could not write {path:?}: {source}")]
    ExportFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Transcript cache error: {0}")]
    Cache(String),
}

impl RunError {
    pub fn transcription(err: impl ToString) -> Self {
        RunError::TranscriptionFailure(err.to_string())
    }
}
