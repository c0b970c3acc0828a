use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    /// The record carried none of the expected score tags, not even `AS`.
    /// Recoverable: the record is dropped, the probe's depth still counts it.
    #[error("Record has no AS tag: {0}")]
    MissingAlignmentScore(String),

    #[error("Malformed metrics table {path}: {reason}")]
    MalformedTable { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
