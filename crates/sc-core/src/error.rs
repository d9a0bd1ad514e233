//! Error type for the core helpers.
//!
//! Sub-crates define their own error enums; the plan importer, for instance,
//! logs an `ScError` from time parsing and carries on.

use thiserror::Error;

/// Errors produced by `sc-core`.
#[derive(Debug, Error)]
pub enum ScError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `sc-core`.
pub type ScResult<T> = Result<T, ScError>;
