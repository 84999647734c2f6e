//! Text and JSON rendering of a finished histogram.

use crate::util::bold;
use promhist_core::{buckets::Bucket, summary::format_float, Histogram, Summary};
use serde::Serialize;
use std::io::{self, Write};

/// Eighth-block glyphs used for the fractional tail of a bar, thinnest first.
const BOXES: [char; 8] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Significant digits used for bucket bounds in labels.
const LABEL_PRECISION: usize = 6;

/// Writes one row per bucket: the bucket label, a bar scaled so the fullest bucket is
/// `bar_width` cells wide, the bucket's own count and its share of all samples.
pub fn write_histogram<W: Write>(
    out: &mut W,
    buckets: &[Bucket],
    bar_width: f64,
    justify: bool,
) -> io::Result<()> {
    let labels = bucket_labels(buckets);
    let counts = per_bucket_counts(buckets);
    let total = buckets.last().map_or(0, |b| b.cumulative_count);
    let max_count = counts.iter().copied().max().unwrap_or(0);
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (label, count) in labels.iter().zip(&counts) {
        let normalized = match max_count {
            0 => 0.0,
            max => *count as f64 / max as f64,
        };
        let percent = match total {
            0 => 0.0,
            total => 100.0 * *count as f64 / total as f64,
        };
        let label = if justify {
            format!("{label:>label_width$}")
        } else {
            format!("{label:<label_width$}")
        };
        writeln!(
            out,
            "{label} {} {count} ({percent:.1} %)",
            column(normalized * bar_width)
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary, styled: bool) -> io::Result<()> {
    let heading = if styled {
        bold("summary:").to_string()
    } else {
        "summary:".to_owned()
    };
    writeln!(out)?;
    writeln!(out, "{heading}")?;
    writeln!(out, " {summary}")
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    buckets: &'a [Bucket],
    summary: &'a Summary,
}

/// Writes buckets and summary as one pretty-printed JSON document. Non-finite numbers
/// (the `+Inf` bound, NaN statistics) become `null`.
pub fn write_json<W: Write>(out: &mut W, histogram: &Histogram) -> serde_json::Result<()> {
    let buckets = histogram.buckets();
    let summary = Summary::from_histogram(histogram);
    serde_json::to_writer_pretty(
        &mut *out,
        &JsonReport {
            buckets: &buckets,
            summary: &summary,
        },
    )?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// `(-∞ .. b0]`, `(b0 .. b1]`, ..., `(bN .. +∞)`.
fn bucket_labels(buckets: &[Bucket]) -> Vec<String> {
    let last = buckets.len().saturating_sub(1);
    buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let lower = match i {
                0 => "-∞".to_owned(),
                _ => format_float(buckets[i - 1].upper_bound, Some(LABEL_PRECISION)),
            };
            if i == last {
                format!("({lower} .. +∞)")
            } else {
                let upper = format_float(bucket.upper_bound, Some(LABEL_PRECISION));
                format!("({lower} .. {upper}]")
            }
        })
        .collect()
}

/// Undoes the cumulative counting: samples that fell into each bucket alone.
fn per_bucket_counts(buckets: &[Bucket]) -> Vec<u64> {
    let mut prev = 0;
    buckets
        .iter()
        .map(|b| {
            let count = b.cumulative_count.saturating_sub(prev);
            prev = b.cumulative_count;
            count
        })
        .collect()
}

/// A horizontal bar `size` cells long, always ending in one partial glyph.
fn column(size: f64) -> String {
    let size = size.max(0.0);
    let full = size.floor();
    let index = (((size - full) * BOXES.len() as f64) as usize).min(BOXES.len() - 1);

    let mut bar = String::from(BOXES[BOXES.len() - 1]).repeat(full as usize);
    bar.push(BOXES[index]);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use promhist_core::scheme::parse_bucket_boundaries;

    fn sample_histogram() -> Histogram {
        let bounds = parse_bucket_boundaries("1,5,10").unwrap();
        Histogram::from_samples(bounds, ["0", "3", "7", "12", "3"]).unwrap()
    }

    fn render(histogram: &Histogram, bar_width: f64, justify: bool) -> String {
        let mut out = Vec::new();
        write_histogram(&mut out, &histogram.buckets(), bar_width, justify).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn labels_cover_the_whole_line() {
        let labels = bucket_labels(&sample_histogram().buckets());
        assert_eq!(
            labels,
            vec!["(-∞ .. 1]", "(1 .. 5]", "(5 .. 10]", "(10 .. +∞)"]
        );
    }

    #[test]
    fn single_bucket_label() {
        let h = Histogram::from_samples(vec![], ["1"]).unwrap();
        assert_eq!(bucket_labels(&h.buckets()), vec!["(-∞ .. +∞)"]);
    }

    #[test]
    fn labels_use_six_significant_digits() {
        let h = Histogram::new(vec![0.1 + 0.2, 1234567.0]);
        assert_eq!(
            bucket_labels(&h.buckets()),
            vec!["(-∞ .. 0.3]", "(0.3 .. 1.23457e+06]", "(1.23457e+06 .. +∞)"]
        );
    }

    #[test]
    fn bars_are_scaled_to_the_fullest_bucket() {
        let expected = concat!(
            " (-∞ .. 1] ██▏ 1 (20.0 %)\n",
            "  (1 .. 5] ████▏ 2 (40.0 %)\n",
            " (5 .. 10] ██▏ 1 (20.0 %)\n",
            "(10 .. +∞) ██▏ 1 (20.0 %)\n",
        );
        assert_eq!(render(&sample_histogram(), 4.0, true), expected);
    }

    #[test]
    fn left_aligned_labels() {
        let rendered = render(&sample_histogram(), 4.0, false);
        let first = rendered.lines().next().unwrap();
        assert_eq!(first, "(-∞ .. 1]  ██▏ 1 (20.0 %)");
    }

    #[test]
    fn empty_histogram_renders_without_dividing_by_zero() {
        let h = Histogram::new(vec![1.0]);
        let expected = concat!("(-∞ .. 1] ▏ 0 (0.0 %)\n", "(1 .. +∞) ▏ 0 (0.0 %)\n");
        assert_eq!(render(&h, 30.0, true), expected);
    }

    #[test]
    fn column_uses_eighth_blocks_for_the_fraction() {
        assert_eq!(column(0.0), "▏");
        assert_eq!(column(1.5), "█▋");
        assert_eq!(column(2.8), "██▉");
        assert_eq!(column(3.0), "███▏");
    }

    #[test]
    fn summary_block() {
        let summary = Summary::from_histogram(&sample_histogram());
        let mut out = Vec::new();
        write_summary(&mut out, &summary, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nsummary:\n count=5, p50=4, p90=10, p95=10, p99=10, avg=5, min=0, max=12\n"
        );
    }

    #[test]
    fn json_report_nulls_infinite_bound() {
        let mut out = Vec::new();
        write_json(&mut out, &sample_histogram()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let buckets = value["buckets"].as_array().unwrap();
        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0]["upper_bound"], 1.0);
        assert_eq!(buckets[1]["cumulative_count"], 3);
        assert!(buckets[3]["upper_bound"].is_null());
        assert_eq!(value["summary"]["count"], 5);
        assert_eq!(value["summary"]["max"], 12.0);
    }
}
