//! Error types for sc-output.

use thiserror::Error;

use sc_population::PopulationError;

/// Errors that can occur when writing scenario files.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Population(#[from] PopulationError),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
