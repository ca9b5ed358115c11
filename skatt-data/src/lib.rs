//! Bundled Skatteverket monthly withholding tables and the convenience
//! constructor for querying them.
//!
//! One fixed-width dataset file per supported income year is compiled into
//! the crate with `include_str!`; `skatt-core` stays free of bundled data
//! and reads it through the [`DatasetSource`] trait.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use skatt_core::TableConfig;
//! use skatt_data::monthly_tax_table;
//!
//! let table = monthly_tax_table(TableConfig::new(30, 30, 2021))?;
//! assert_eq!(table.get(dec!(1601))?, 117);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use skatt_core::{ConfigError, DatasetSource, SourceError, TableConfig, TaxTable};

const MONTHLY_TAX_2021: &str = include_str!("../data/monthly_tax_2021.txt");
const MONTHLY_TAX_2022: &str = include_str!("../data/monthly_tax_2022.txt");
const MONTHLY_TAX_2023: &str = include_str!("../data/monthly_tax_2023.txt");

/// Dataset source backed by the files bundled with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledDataset;

impl DatasetSource for BundledDataset {
    fn dataset(&self, income_year: i32) -> Result<&str, SourceError> {
        match income_year {
            2021 => Ok(MONTHLY_TAX_2021),
            2022 => Ok(MONTHLY_TAX_2022),
            2023 => Ok(MONTHLY_TAX_2023),
            other => Err(SourceError::UnsupportedIncomeYear(other)),
        }
    }
}

/// A withholding table over the bundled datasets.
pub fn monthly_tax_table(config: TableConfig) -> Result<TaxTable<BundledDataset>, ConfigError> {
    TaxTable::new(config, BundledDataset)
}
