//! Assembles the ordered rule list for one withholding table.

use thiserror::Error;
use tracing::debug;

use crate::models::{Deduction, FormatVersion, TableConfig, TaxRule};
use crate::parser::{FormatError, RawRecord, RecordParser, RowKind};

/// A dataset that could not be turned into a usable table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableBuildError {
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The requested table number matched no rows at all, which means the
    /// configuration asks for a table the dataset does not carry.
    #[error("no rows found for table {table_number} in income year {income_year}")]
    EmptyTable { table_number: u8, income_year: i32 },
}

/// Builds the [`TaxRule`] for one record, selecting the tax column that
/// applies at the given age. Layouts with a single tax column ignore the age.
pub fn build_rule(record: &RawRecord, age: u8) -> TaxRule {
    let tax = match record.tax_65_and_over {
        Some(senior) if age >= 65 => senior,
        _ => record.tax_under_65,
    };
    let deduction = match record.kind {
        RowKind::Amount => Deduction::Amount(tax),
        // the parser enforces 0..=100 for percentage records
        RowKind::Percentage => Deduction::Percentage(tax as u8),
    };
    TaxRule {
        lower_bound: record.lower_bound,
        upper_bound: record.upper_bound,
        deduction,
    }
}

/// Reads every record of one income year's dataset and keeps the rows
/// belonging to the configured table, in source order.
#[derive(Debug)]
pub struct TableBuilder<'a> {
    config: TableConfig,
    parser: RecordParser<'a>,
}

impl<'a> TableBuilder<'a> {
    pub fn new(config: TableConfig, format: &'a FormatVersion) -> Self {
        Self {
            config,
            parser: RecordParser::new(format),
        }
    }

    /// Assembles the ordered rule list.
    ///
    /// Rows arrive sorted by ascending lower bound in the source files and
    /// are not re-sorted. Lines that do not start with the record marker are
    /// structural and skipped; rows for other tables are expected and
    /// skipped as well.
    pub fn build<'l>(
        &self,
        lines: impl IntoIterator<Item = &'l str>,
    ) -> Result<Vec<TaxRule>, TableBuildError> {
        let mut rules = Vec::new();
        for line in lines {
            if !self.parser.is_record(line) {
                continue;
            }
            let record = self.parser.parse(line)?;
            if record.table_number != self.config.table_number {
                continue;
            }
            rules.push(build_rule(&record, self.config.age));
        }
        if rules.is_empty() {
            return Err(TableBuildError::EmptyTable {
                table_number: self.config.table_number,
                income_year: self.config.income_year,
            });
        }
        debug!(
            table_number = self.config.table_number,
            income_year = self.config.income_year,
            rows = rules.len(),
            "built withholding table"
        );
        Ok(rules)
    }
}
