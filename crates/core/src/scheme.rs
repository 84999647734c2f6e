//! Bucket boundary schemes.
//!
//! A scheme yields the ascending list of finite upper bounds for a run. The
//! catch-all `+Inf` bucket is never part of the list; [`Histogram`](crate::Histogram)
//! appends it on construction.

use crate::{error::Error, Result};
use strum::{Display, EnumString};
use tracing::debug;

pub const DEFAULT_START: f64 = 1.0;
pub const DEFAULT_FACTOR: f64 = 5.0;
pub const DEFAULT_WIDTH: f64 = 1.0;
pub const DEFAULT_COUNT: usize = 10;

/// Parsed from `linear`/`lin` or `exponential`/`exp`, ignoring case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum BucketMode {
    #[default]
    #[strum(to_string = "linear", serialize = "lin")]
    Linear,
    #[strum(to_string = "exponential", serialize = "exp")]
    Exponential,
}

/// Exactly one way of producing bucket bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketScheme {
    /// Comma separated list of bounds, e.g. `"1,5,10"`.
    Explicit(String),
    Linear {
        start: f64,
        width: f64,
        count: usize,
    },
    Exponential {
        start: f64,
        factor: f64,
        count: usize,
    },
}

impl BucketScheme {
    pub fn bounds(&self) -> Result<Vec<f64>> {
        let bounds = match self {
            BucketScheme::Explicit(list) => parse_bucket_boundaries(list),
            BucketScheme::Linear {
                start,
                width,
                count,
            } => linear_buckets(*start, *width, *count),
            BucketScheme::Exponential {
                start,
                factor,
                count,
            } => exponential_buckets(*start, *factor, *count),
        }?;
        debug!("{self:?} produced {} finite bounds", bounds.len());
        Ok(bounds)
    }
}

/// Bucket settings as they arrive from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketConfig {
    pub start: f64,
    pub factor: f64,
    pub width: f64,
    pub count: usize,
    pub mode: BucketMode,
    pub explicit_buckets: Option<String>,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            factor: DEFAULT_FACTOR,
            width: DEFAULT_WIDTH,
            count: DEFAULT_COUNT,
            mode: BucketMode::default(),
            explicit_buckets: None,
        }
    }
}

impl BucketConfig {
    /// Resolves the active scheme. A non-empty explicit list always wins over `mode`.
    pub fn scheme(&self) -> BucketScheme {
        match self.explicit_buckets.as_deref() {
            Some(list) if !list.trim().is_empty() => BucketScheme::Explicit(list.to_owned()),
            _ => match self.mode {
                BucketMode::Linear => BucketScheme::Linear {
                    start: self.start,
                    width: self.width,
                    count: self.count,
                },
                BucketMode::Exponential => BucketScheme::Exponential {
                    start: self.start,
                    factor: self.factor,
                    count: self.count,
                },
            },
        }
    }

    pub fn bounds(&self) -> Result<Vec<f64>> {
        self.scheme().bounds()
    }
}

/// Parses a comma separated list of bounds and sorts it ascending.
/// Duplicates are kept and simply produce empty buckets.
pub fn parse_bucket_boundaries(input: &str) -> Result<Vec<f64>> {
    let mut bounds = input
        .split(',')
        .map(|token| match token.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(Error::InvalidBoundary(token.to_owned())),
        })
        .collect::<Result<Vec<_>>>()?;

    bounds.sort_by(f64::total_cmp);
    Ok(bounds)
}

/// `count` bounds starting at `start`, each `width` apart.
pub fn linear_buckets(start: f64, width: f64, count: usize) -> Result<Vec<f64>> {
    if count < 1 {
        return Err(Error::InvalidCount(count));
    }
    Ok((0..count).map(|k| start + width * k as f64).collect())
}

/// `count` bounds starting at `start`, each `factor` times the previous one.
pub fn exponential_buckets(start: f64, factor: f64, count: usize) -> Result<Vec<f64>> {
    if count < 1 {
        return Err(Error::InvalidCount(count));
    }
    if start <= 0.0 {
        return Err(Error::InvalidStart(start));
    }
    if factor <= 1.0 {
        return Err(Error::InvalidFactor(factor));
    }

    let mut bounds = Vec::with_capacity(count);
    let mut next = start;
    for _ in 0..count {
        bounds.push(next);
        next *= factor;
    }
    Ok(bounds)
}
