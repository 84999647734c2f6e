use crate::error::PromhistError;
use nu_ansi_term::{AnsiGenericString, Style};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Sends logs to stderr so they never interleave with the histogram on stdout.
/// `RUST_LOG` overrides the level picked from `verbosity`.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init(); // ignore error; a subscriber is already installed
}

/// Opens `path` for buffered reading, or stdin when no path (or `-`) is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>, PromhistError> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::open(path).map_err(|e| PromhistError::OpenInput(path.to_owned(), e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

pub fn bold<'a>(msg: impl AsRef<str> + 'a) -> AnsiGenericString<'a, str> {
    Style::new().bold().paint(msg.as_ref().to_owned())
}
