use crate::Histogram;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Scalar statistics derived from a [`Histogram`]. Quantiles are bucket estimates, the
/// other fields are exact. Every float is NaN when no samples were seen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: u64,
    pub p50: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_histogram(histogram: &Histogram) -> Self {
        Self {
            count: histogram.count(),
            p50: histogram.quantile(0.5),
            p90: histogram.quantile(0.9),
            p95: histogram.quantile(0.95),
            p99: histogram.quantile(0.99),
            avg: histogram.average(),
            min: histogram.min().unwrap_or(f64::NAN),
            max: histogram.max().unwrap_or(f64::NAN),
        }
    }
}

impl From<&Histogram> for Summary {
    fn from(histogram: &Histogram) -> Self {
        Self::from_histogram(histogram)
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = [
            ("p50", self.p50),
            ("p90", self.p90),
            ("p95", self.p95),
            ("p99", self.p99),
            ("avg", self.avg),
            ("min", self.min),
            ("max", self.max),
        ];
        write!(f, "count={}", self.count)?;
        for (name, value) in stats {
            write!(f, ", {name}={}", format_float(value, None))?;
        }
        Ok(())
    }
}

/// Formats a float the way C's `%g` does: plain notation for moderate exponents, scientific
/// (`1.5e+06`) otherwise, trailing zeros dropped. `precision` is the number of significant
/// digits; `None` keeps the shortest representation that round-trips.
pub fn format_float(value: f64, precision: Option<usize>) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_owned();
    }

    let sci = match precision {
        Some(digits) => format!("{:.*e}", digits.max(1) - 1, value),
        None => format!("{value:e}"),
    };
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or_default();
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };

    let max_exp = precision.unwrap_or(6) as i32;
    if exp < -4 || exp >= max_exp {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }

    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let point = exp + 1;
    let body = if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= digits.len() {
        format!("{digits}{}", "0".repeat(point as usize - digits.len()))
    } else {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    };
    if negative {
        format!("-{body}")
    } else {
        body
    }
}
