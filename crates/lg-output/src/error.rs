//! Errors raised while writing run telemetry.

use thiserror::Error;

/// A failed write to one of the telemetry files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("telemetry I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("telemetry CSV record failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
