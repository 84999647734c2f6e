//! One-pass accumulation of samples into cumulative buckets.

use crate::{
    buckets::{Bucket, BucketsExt},
    error::Error,
    Result,
};
use tracing::{debug, info};

/// Running aggregate of a sample stream.
///
/// Holds one counter per bucket plus sum, count, min and max. The memory used is
/// proportional to the number of buckets and never to the number of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bounds: Vec<f64>,
    /// Samples per bucket (not cumulative), one more entry than `bounds` for `+Inf`.
    counts: Vec<u64>,
    sum: f64,
    count: u64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Histogram {
    /// Creates an empty histogram over the given finite upper bounds. The bounds are sorted
    /// and a trailing `+Inf` bucket is added, so `B` bounds give `B + 1` buckets.
    pub fn new(mut bounds: Vec<f64>) -> Self {
        bounds.sort_by(f64::total_cmp);
        debug!("histogram with {} buckets", bounds.len() + 1);
        let counts = vec![0; bounds.len() + 1];
        Self {
            bounds,
            counts,
            sum: 0.0,
            count: 0,
            min: None,
            max: None,
        }
    }

    /// Consumes a stream of textual samples. Stops at the first malformed sample and
    /// returns its error; no partially filled histogram escapes.
    pub fn from_samples<I, S>(bounds: Vec<f64>, samples: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut histogram = Self::new(bounds);
        for sample in samples {
            histogram.observe_str(sample.as_ref())?;
        }
        info!("consumed {} samples", histogram.count);
        Ok(histogram)
    }

    /// Decodes a raw input line and records it. A line that is not valid UTF-8 is a
    /// malformed sample like any other non-numeric line.
    pub fn observe_bytes(&mut self, line: &[u8]) -> Result<()> {
        match std::str::from_utf8(line) {
            Ok(line) => self.observe_str(line),
            Err(_) => Err(Error::MalformedSample(
                String::from_utf8_lossy(line).trim().to_owned(),
            )),
        }
    }

    /// Parses a single trimmed line and records it.
    pub fn observe_str(&mut self, line: &str) -> Result<()> {
        let trimmed = line.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if !value.is_nan() => self.observe(value),
            _ => Err(Error::MalformedSample(trimmed.to_owned())),
        }
    }

    /// Records one sample. The value lands in the first bucket whose bound is `>= value`.
    /// NaN cannot be ordered against the bounds and is rejected without touching the state.
    pub fn observe(&mut self, value: f64) -> Result<()> {
        if value.is_nan() {
            return Err(Error::MalformedSample(value.to_string()));
        }

        let idx = self.bounds.partition_point(|bound| *bound < value);
        self.counts[idx] += 1;

        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
        self.sum += value;
        self.count += 1;
        Ok(())
    }

    /// Cumulative buckets, ending with the `+Inf` bucket whose count equals [`Self::count`].
    pub fn buckets(&self) -> Vec<Bucket> {
        let upper_bounds = self.bounds.iter().copied().chain([f64::INFINITY]);
        upper_bounds
            .zip(&self.counts)
            .scan(0, |cumulative, (upper_bound, count)| {
                *cumulative += count;
                Some(Bucket::new(upper_bound, *cumulative))
            })
            .collect()
    }

    /// Samples per bucket, in bucket order.
    pub fn bucket_counts(&self) -> &[u64] {
        &self.counts
    }

    /// Finite upper bounds, ascending.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// NaN for an empty histogram.
    pub fn average(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// See [`BucketsExt::estimate_quantile`]. With no finite bounds at all the observed
    /// maximum is the best available estimate and is returned instead of NaN.
    pub fn quantile(&self, quantile: f64) -> f64 {
        let estimate = self.buckets().estimate_quantile(quantile);
        match self.max {
            Some(max)
                if estimate.is_nan() && self.bounds.is_empty() && !quantile.is_nan() =>
            {
                max
            }
            _ => estimate,
        }
    }
}
