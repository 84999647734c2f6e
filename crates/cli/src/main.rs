mod commands;
mod error;
mod render;
mod util;

use commands::{HistogramArgs, PromhistCli};

fn main() -> miette::Result<()> {
    let args = PromhistCli::parse_args();
    util::init_tracing(args.verbose);

    commands::histogram(HistogramArgs::from(args))?;
    Ok(())
}
