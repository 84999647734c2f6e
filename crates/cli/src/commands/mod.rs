pub mod histogram;

use clap::{ArgAction, Args, Parser};
use promhist_core::scheme::{
    BucketConfig, BucketMode, DEFAULT_COUNT, DEFAULT_FACTOR, DEFAULT_START, DEFAULT_WIDTH,
};
use std::path::PathBuf;

pub use histogram::{histogram, HistogramArgs};

#[derive(Parser, Debug)]
#[command(
    name = "promhist",
    version,
    about = "Print a Prometheus-style histogram of the numbers read from stdin, one per line."
)]
pub struct PromhistCli {
    #[command(flatten)]
    pub buckets: BucketCliArgs,

    /// Width of the largest bin.
    #[arg(long, default_value_t = 30)]
    pub column_width: usize,

    /// Left-align bucket labels instead of right-justifying them.
    #[arg(long)]
    pub left_align: bool,

    /// Output format: text bars (default) or json (machine-readable).
    #[arg(long, short = 'f', default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Raise log verbosity on stderr (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// File to read samples from. Reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,
}

impl PromhistCli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Args, Debug, Clone)]
pub struct BucketCliArgs {
    /// Start value for linear or exponential buckets.
    #[arg(long, default_value_t = DEFAULT_START, allow_negative_numbers = true)]
    pub start: f64,

    /// Factor used when computing exponential buckets.
    #[arg(long, default_value_t = DEFAULT_FACTOR, allow_negative_numbers = true)]
    pub factor: f64,

    /// Width of linear buckets.
    #[arg(long, default_value_t = DEFAULT_WIDTH, allow_negative_numbers = true)]
    pub width: f64,

    /// Number of linear or exponential buckets.
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Linear (lin) or exponential (exp).
    #[arg(long, default_value_t = BucketMode::Linear, env = "PROMHIST_MODE")]
    pub mode: BucketMode,

    /// Explicit buckets: comma separated bucket boundaries. Takes precedence over --mode.
    #[arg(
        long = "buckets",
        value_name = "BOUNDS",
        allow_hyphen_values = true,
        env = "PROMHIST_BUCKETS"
    )]
    pub explicit_buckets: Option<String>,
}

impl From<BucketCliArgs> for BucketConfig {
    fn from(args: BucketCliArgs) -> Self {
        Self {
            start: args.start,
            factor: args.factor,
            width: args.width,
            count: args.count,
            mode: args.mode,
            explicit_buckets: args.explicit_buckets,
        }
    }
}

#[derive(Copy, Debug, Clone, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}
