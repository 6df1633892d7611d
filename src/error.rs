// Tax Dashboard - Error Types
// The data source is the only thing in the pipeline that can fail.

use std::path::PathBuf;
use thiserror::Error;

/// DataUnavailable - the backing record source could not produce records
///
/// Fatal for the event that triggered the load. There is no retry; the next
/// hover event simply tries again.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("data source {path:?} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("data source is missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("data source row {line} is malformed: {source}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

impl DataUnavailable {
    /// Wrap a csv error raised while decoding a row
    pub(crate) fn malformed(source: csv::Error) -> Self {
        let line = source.position().map(|p| p.line()).unwrap_or(0);
        DataUnavailable::Malformed { line, source }
    }
}
