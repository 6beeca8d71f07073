//! Access log errors.

use thiserror::Error;

/// Failure to produce or emit one access log line.
///
/// None of these reach the client: the response has already been produced
/// when a record is built.
#[derive(Debug, Error)]
pub enum LogError {
    /// A required context value was never recorded for the request.
    #[error("request context is missing {0}")]
    MissingContext(&'static str),

    #[error("failed to encode access log record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write access log line: {0}")]
    Sink(#[from] std::io::Error),
}

impl LogError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            LogError::MissingContext(_) => "missing_context",
            LogError::Serialize(_) => "serialize",
            LogError::Sink(_) => "sink",
        }
    }
}
