//! This module provides functionality for estimating quantiles from a set of buckets.
//! It includes a `Bucket` struct representing a single bucket with an upper bound and cumulative count,
//! and a `BucketsExt` trait that provides an extension method for estimating quantiles from a slice of buckets.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// `f64::INFINITY` for the catch-all bucket.
    pub upper_bound: f64,
    /// Number of samples `<= upper_bound`.
    pub cumulative_count: u64,
}

impl Bucket {
    pub fn new(upper_bound: f64, cumulative_count: u64) -> Self {
        Self {
            upper_bound,
            cumulative_count,
        }
    }
}

impl From<(f64, u64)> for Bucket {
    fn from((upper_bound, cumulative_count): (f64, u64)) -> Self {
        Self::new(upper_bound, cumulative_count)
    }
}

pub trait BucketsExt {
    /// Estimates the value below which a fraction `quantile` of the samples fall, by linear
    /// interpolation inside the bucket whose cumulative count straddles the target rank.
    ///
    /// Buckets must be sorted by upper bound, with cumulative counts and a trailing `+Inf`
    /// bucket. Returns NaN when there is nothing to estimate from (no samples, a NaN
    /// quantile, or only the `+Inf` bucket). Quantiles below 0 yield `-Inf` and above 1 `+Inf`.
    ///
    /// A rank that lands in the `+Inf` bucket yields the largest finite upper bound, which is
    /// only a lower bound for the true value.
    fn estimate_quantile(&self, quantile: f64) -> f64;
}

impl BucketsExt for [Bucket] {
    fn estimate_quantile(&self, quantile: f64) -> f64 {
        let Some(last) = self.last() else {
            return f64::NAN;
        };
        if quantile.is_nan() || last.cumulative_count == 0 {
            return f64::NAN;
        }
        if quantile < 0.0 {
            return f64::NEG_INFINITY;
        }
        if quantile > 1.0 {
            return f64::INFINITY;
        }

        let target = quantile * last.cumulative_count as f64;
        let i = self
            .iter()
            .position(|b| b.cumulative_count as f64 >= target)
            .unwrap_or(self.len() - 1);

        if i == self.len() - 1 && last.upper_bound == f64::INFINITY {
            return match i {
                0 => f64::NAN,
                _ => self[i - 1].upper_bound,
            };
        }

        let upper_bound = self[i].upper_bound;
        let (lower_bound, lower_count) = match i {
            // nothing below a non-positive first bound to interpolate from
            0 if upper_bound <= 0.0 => return upper_bound,
            0 => (0.0, 0),
            _ => (self[i - 1].upper_bound, self[i - 1].cumulative_count),
        };
        let upper_count = self[i].cumulative_count;

        if upper_count == lower_count {
            return lower_bound;
        }
        let position = (target - lower_count as f64) / (upper_count - lower_count) as f64;
        // rounding must not carry the estimate past the bucket's own edge
        (lower_bound + (upper_bound - lower_bound) * position).min(upper_bound)
    }
}

impl BucketsExt for Vec<Bucket> {
    fn estimate_quantile(&self, quantile: f64) -> f64 {
        self.as_slice().estimate_quantile(quantile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets(pairs: &[(f64, u64)]) -> Vec<Bucket> {
        pairs.iter().copied().map(Bucket::from).collect()
    }

    #[test]
    fn interpolates_inside_the_straddling_bucket() {
        let b = buckets(&[
            (1.0, 1),
            (2.0, 2),
            (3.0, 3),
            (4.0, 4),
            (5.0, 5),
            (f64::INFINITY, 5),
        ]);
        assert_eq!(b.estimate_quantile(0.5), 2.5);
        assert_eq!(b.estimate_quantile(0.9), 4.5);
        assert_eq!(b.estimate_quantile(1.0), 5.0);
    }

    #[test]
    fn first_bucket_interpolates_from_zero() {
        let b = buckets(&[(10.0, 4), (f64::INFINITY, 4)]);
        assert_eq!(b.estimate_quantile(0.5), 5.0);
        assert_eq!(b.estimate_quantile(0.25), 2.5);
    }

    #[test]
    fn non_positive_first_bound_is_returned_as_is() {
        let b = buckets(&[(-5.0, 2), (0.0, 4), (f64::INFINITY, 4)]);
        assert_eq!(b.estimate_quantile(0.25), -5.0);
        assert_eq!(b.estimate_quantile(0.75), -2.5);
    }

    #[test]
    fn rank_in_infinite_bucket_returns_largest_finite_bound() {
        let b = buckets(&[(1.0, 1), (5.0, 2), (10.0, 3), (f64::INFINITY, 4)]);
        assert_eq!(b.estimate_quantile(0.99), 10.0);
        assert_eq!(b.estimate_quantile(1.0), 10.0);
    }

    #[test]
    fn nothing_to_estimate_from() {
        assert!(Vec::<Bucket>::new().estimate_quantile(0.5).is_nan());
        assert!(buckets(&[(1.0, 0), (f64::INFINITY, 0)])
            .estimate_quantile(0.5)
            .is_nan());
        assert!(buckets(&[(f64::INFINITY, 3)]).estimate_quantile(0.5).is_nan());
        assert!(buckets(&[(1.0, 1), (f64::INFINITY, 1)])
            .estimate_quantile(f64::NAN)
            .is_nan());
    }

    #[test]
    fn out_of_range_quantiles_saturate() {
        let b = buckets(&[(1.0, 1), (f64::INFINITY, 1)]);
        assert_eq!(b.estimate_quantile(-0.1), f64::NEG_INFINITY);
        assert_eq!(b.estimate_quantile(1.1), f64::INFINITY);
    }

    #[test]
    fn empty_buckets_between_samples_are_skipped() {
        let b = buckets(&[(1.0, 2), (2.0, 2), (3.0, 2), (4.0, 4), (f64::INFINITY, 4)]);
        // target rank 2 is reached in the first bucket already
        assert_eq!(b.estimate_quantile(0.5), 1.0);
        assert_eq!(b.estimate_quantile(0.75), 3.5);
    }

    #[test]
    fn zero_quantile_with_empty_leading_bucket() {
        let b = buckets(&[(1.0, 0), (2.0, 3), (f64::INFINITY, 3)]);
        assert_eq!(b.estimate_quantile(0.0), 0.0);
    }
}
