//! Error type shared by every stage of the benchmark pipeline.

use std::io;
use thiserror::Error;

/// Everything that can abort a benchmark run.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration in '{path}': {reason}")]
    Config { path: String, reason: String },

    #[error("cannot compute statistics from an empty timing sequence")]
    EmptySamples,

    #[error("invalid progress bar template: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    #[error("failed to render chart: {0}")]
    Chart(String),

    #[error("failed to display '{path}': {reason}")]
    Display { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, BenchError>;
