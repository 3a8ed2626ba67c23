use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the census table. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open census CSV {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read census CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("census CSV {path:?} is missing required columns: {}", missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("census CSV {path:?} line {line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("census CSV {path:?} has a header but no data rows")]
    Empty { path: PathBuf },
}

/// A query parameter the page cannot interpret.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("year must be an integer, got {0:?}")]
    Year(String),

    #[error("unknown category {0:?}")]
    Category(String),

    #[error("unknown changed field {0:?} (expected year, sido, sgg or category)")]
    Changed(String),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dashboard dispatcher is not running")]
    Closed,

    #[error("dashboard dispatcher dropped the reply")]
    NoReply,
}

#[derive(Debug, Error)]
#[error("chart drawing failed: {0}")]
pub struct ChartError(pub String);
