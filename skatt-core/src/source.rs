//! Where dataset text comes from.

use thiserror::Error;

/// The source had nothing to offer for the requested year.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("no dataset available for income year {0}")]
    UnsupportedIncomeYear(i32),
}

/// Supplies the raw fixed-width text for an income year.
///
/// The engine only needs "the text lines for a given year"; bundled
/// resources, filesystem reads, and in-memory fixtures all qualify.
pub trait DatasetSource {
    fn dataset(&self, income_year: i32) -> Result<&str, SourceError>;
}
