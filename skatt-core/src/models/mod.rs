mod bound;
mod config;
mod format;
mod rule;

pub use bound::Bound;
pub use config::TableConfig;
pub use format::{FormatVersion, LATEST_INCOME_YEAR, SUPPORTED_INCOME_YEARS};
pub use rule::{Deduction, TaxRule};
