use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Malformed interval line (need at least chrom, start, end): {0}")]
    MalformedInterval(String),

    #[error("Error parsing interval coordinate: {0}")]
    CoordinateParseError(String),

    #[error("Interval end precedes start: {0}")]
    InvertedInterval(String),

    #[error("Corrupted file. 0 probes found in the file: {0}")]
    EmptyCatalog(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
