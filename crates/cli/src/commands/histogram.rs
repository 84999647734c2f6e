use crate::{
    commands::{OutputFormat, PromhistCli},
    error::PromhistError,
    render, util,
};
use promhist_core::{scheme::BucketConfig, Histogram, Summary};
use std::{
    io::{self, BufRead, BufWriter, IsTerminal, Write},
    path::PathBuf,
};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct HistogramArgs {
    pub buckets: BucketConfig,
    pub column_width: usize,
    pub justify: bool,
    pub format: OutputFormat,
    pub input: Option<PathBuf>,
}

impl From<PromhistCli> for HistogramArgs {
    fn from(cli: PromhistCli) -> Self {
        Self {
            buckets: cli.buckets.into(),
            column_width: cli.column_width,
            justify: !cli.left_align,
            format: cli.format,
            input: cli.input,
        }
    }
}

/// Reads samples from the configured input and prints the histogram to stdout.
pub fn histogram(args: HistogramArgs) -> Result<(), PromhistError> {
    let input = util::open_input(args.input.as_deref())?;
    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut out = BufWriter::new(stdout.lock());
    run(&args, input, &mut out, styled)?;
    out.flush()?;
    Ok(())
}

/// Builds the buckets, consumes `input` to the end and only then writes the report, so a
/// failure anywhere leaves `out` untouched.
pub fn run<R: BufRead, W: Write>(
    args: &HistogramArgs,
    input: R,
    out: &mut W,
    styled: bool,
) -> Result<(), PromhistError> {
    let bounds = args.buckets.bounds().map_err(PromhistError::Buckets)?;
    debug!("using {} finite bucket bounds", bounds.len());

    let mut histogram = Histogram::new(bounds);
    for line in input.split(b'\n') {
        histogram
            .observe_bytes(&line?)
            .map_err(PromhistError::Samples)?;
    }
    info!("consumed {} samples", histogram.count());

    debug!("writing {} output", args.format);
    match args.format {
        OutputFormat::Text => {
            render::write_histogram(
                out,
                &histogram.buckets(),
                args.column_width as f64,
                args.justify,
            )?;
            render::write_summary(out, &Summary::from_histogram(&histogram), styled)?;
        }
        OutputFormat::Json => render::write_json(out, &histogram)?,
    }
    Ok(())
}
