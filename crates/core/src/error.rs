use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("non-numeric bucket boundary: {0:?}")]
    InvalidBoundary(String),

    #[error("buckets need a positive count, got {0}")]
    InvalidCount(usize),

    #[error("exponential buckets need a positive start value, got {0}")]
    InvalidStart(f64),

    #[error("exponential buckets need a factor greater than 1, got {0}")]
    InvalidFactor(f64),

    #[error("found non-numerical input: {0:?}")]
    MalformedSample(String),
}
