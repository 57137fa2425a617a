use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("sequence too short to extract patterns (normalized length {len}, need at least 3)")]
    SequenceTooShort { len: usize },

    #[error("malformed triplet of length {len} (expected exactly 3 bases)")]
    MalformedTriplet { len: usize },

    #[error("sequence io error: {0}")]
    SequenceIo(#[from] io::Error),

    #[error("csv export error: {source}")]
    CsvExport {
        #[source]
        source: csv::Error,
    },
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
