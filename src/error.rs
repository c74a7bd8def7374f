use thiserror::Error;
use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text processing error: {0}")]
    TextProcessing(String),

    // A quote id reached the graph twice; ids upstream are not unique and
    // the run is aborted.
    #[error("Quote {quote_id} already mapped to cluster {existing}, cannot map it again to {attempted}")]
    DuplicateEdge {
        quote_id: String,
        existing: usize,
        attempted: usize,
    },

    #[error("Cluster store error: {0}")]
    ClusterStore(String),

    #[error("Async operation error: {0}")]
    AsyncError(String),

    #[error("Run interrupted: {0}")]
    Interrupted(String),
}

// Type alias for Result
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error conversions
impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn text<S: Into<String>>(msg: S) -> Self {
        Error::TextProcessing(msg.into())
    }

    pub fn cluster_store<S: Into<String>>(msg: S) -> Self {
        Error::ClusterStore(msg.into())
    }

    pub fn async_err<S: Into<String>>(msg: S) -> Self {
        Error::AsyncError(msg.into())
    }

    pub fn interrupted<S: Into<String>>(msg: S) -> Self {
        Error::Interrupted(msg.into())
    }
}

impl From<crate::parser::ParserError> for Error {
    fn from(err: crate::parser::ParserError) -> Self {
        match err {
            crate::parser::ParserError::IoError(e) => Error::Io(e),
            crate::parser::ParserError::CsvError(e) => Error::Csv(e),
            crate::parser::ParserError::JsonError(e) => Error::Json(e),
            other => Error::TextProcessing(other.to_string()),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Config(format!("Invalid regular expression: {}", err))
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::AsyncError(format!("Thread pool build failed: {}", err))
    }
}
