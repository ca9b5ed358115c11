//! Parser and lookup engine for the Swedish monthly withholding-tax tables
//! ("skattetabeller") published by Skatteverket.
//!
//! The source data is one fixed-width text file per income year. Each record
//! line carries a table number, an inclusive salary band, and the deduction
//! for that band, either as a flat amount in whole kronor or as a percentage
//! of the gross salary. This crate decodes those lines, assembles the ordered
//! band list for a `(table number, age, income year)` configuration, and
//! answers salary → deduction queries against it.
//!
//! The datasets themselves ship with the companion `skatt-data` crate;
//! anything that can produce the raw text for a year works through
//! [`DatasetSource`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use skatt_core::{DatasetSource, SourceError, TableConfig, TaxTable};
//!
//! struct Fixture(&'static str);
//!
//! impl DatasetSource for Fixture {
//!     fn dataset(&self, _income_year: i32) -> Result<&str, SourceError> {
//!         Ok(self.0)
//!     }
//! }
//!
//! let dataset = "30B3000000000001600000000000000000\n30B3000016010001800001170011000104\n30%300001801       000310002900027";
//! let table = TaxTable::new(TableConfig::new(30, 30, 2021), Fixture(dataset))?;
//! assert_eq!(table.get(dec!(1700))?, 117);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod models;
pub mod parser;
pub mod source;
pub mod table;

pub use builder::{TableBuildError, TableBuilder, build_rule};
pub use models::{
    Bound, Deduction, FormatVersion, LATEST_INCOME_YEAR, SUPPORTED_INCOME_YEARS, TableConfig,
    TaxRule,
};
pub use parser::{FormatError, RawRecord, RecordParser, RowKind};
pub use source::{DatasetSource, SourceError};
pub use table::{ConfigError, TaxTable, TaxTableError};
