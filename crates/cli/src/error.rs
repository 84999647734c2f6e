use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromhistError {
    #[error("failed to create buckets")]
    #[diagnostic(help("check --buckets, or --start/--factor/--count for the selected --mode"))]
    Buckets(#[source] promhist_core::Error),

    #[error("failed to read samples")]
    #[diagnostic(help("every input line must hold exactly one number"))]
    Samples(#[source] promhist_core::Error),

    #[error("failed to open input file {}", .0.display())]
    OpenInput(PathBuf, #[source] std::io::Error),

    #[error("failed to read input")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report")]
    SerdeJson(#[from] serde_json::Error),
}
