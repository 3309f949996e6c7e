//! Dataset store: loads the `;`-delimited birth statistics file once and
//! exposes it as an immutable [`BirthTable`].
//!
//! Normalization applied while loading, in order: the year column is coerced
//! to an integer, then the department column is left-padded with `'0'` to
//! two characters.

mod normalizer;
mod parser;
mod record;
mod table;

pub use record::{BirthRecord, Department, Sex};
pub use table::{BirthTable, DatasetSummary};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read birth dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid birth dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("birth dataset is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: year '{value}' is not an integer")]
    InvalidYear { line: u64, value: String },
    #[error("line {line}: sex '{value}' must be 1 or 2")]
    InvalidSex { line: u64, value: String },
    #[error("line {line}: count '{value}' is not a non-negative integer")]
    InvalidCount { line: u64, value: String },
    #[error("line {line}: department '{value}' is not a valid code")]
    InvalidDepartment { line: u64, value: String },
}
