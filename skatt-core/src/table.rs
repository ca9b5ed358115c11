//! The query engine: a lazily built, memoized salary → deduction lookup.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

use crate::builder::{TableBuildError, TableBuilder};
use crate::models::{Bound, FormatVersion, TableConfig, TaxRule};
use crate::source::{DatasetSource, SourceError};

/// A configuration that can never produce a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("income year {0} is not supported")]
    UnsupportedIncomeYear(i32),

    #[error("table number {number} is not valid for income year {income_year}")]
    InvalidTableNumber { number: u8, income_year: i32 },
}

/// A query that could not be answered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error(transparent)]
    Build(#[from] TableBuildError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("salary {salary} is outside the range covered by table {table_number} for {income_year}")]
    SalaryOutOfRange {
        salary: Decimal,
        table_number: u8,
        income_year: i32,
    },

    /// A salary passed the range check but matched no band. The bands of a
    /// valid table partition its whole range, so this means the source data
    /// has a gap.
    #[error("no row matched salary {0} despite passing the range check")]
    Inconsistent(i64),
}

/// Salary → deduction lookup for one `(table number, age, income year)`
/// configuration.
///
/// Construction only validates the configuration; the rule list is built
/// from the dataset on the first query and cached for the lifetime of the
/// instance. Instances share nothing, so distinct configurations can be
/// built and queried independently.
#[derive(Debug)]
pub struct TaxTable<S> {
    config: TableConfig,
    format: &'static FormatVersion,
    source: S,
    rules: OnceLock<Vec<TaxRule>>,
}

impl<S: DatasetSource> TaxTable<S> {
    pub fn new(config: TableConfig, source: S) -> Result<Self, ConfigError> {
        let format = FormatVersion::for_income_year(config.income_year)
            .ok_or(ConfigError::UnsupportedIncomeYear(config.income_year))?;
        if !format.table_numbers().contains(&config.table_number) {
            return Err(ConfigError::InvalidTableNumber {
                number: config.table_number,
                income_year: config.income_year,
            });
        }
        Ok(Self {
            config,
            format,
            source,
            rules: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The built rule list, assembling it on first use.
    ///
    /// A failed build is not cached; the dataset is static, so a retry fails
    /// identically.
    pub fn rules(&self) -> Result<&[TaxRule], TaxTableError> {
        if let Some(rules) = self.rules.get() {
            return Ok(rules);
        }
        let text = self.source.dataset(self.config.income_year)?;
        let rules = TableBuilder::new(self.config, self.format).build(text.lines())?;
        Ok(self.rules.get_or_init(|| rules))
    }

    /// The deduction for a gross monthly salary.
    ///
    /// Salaries at or below zero owe nothing and short-circuit before any
    /// lookup. Anything else is rounded to the nearest whole krona (ties to
    /// even) and matched against the table's inclusive bands; the first
    /// matching band wins.
    pub fn get(&self, gross_salary: Decimal) -> Result<i64, TaxTableError> {
        let rules = self.rules()?;
        if gross_salary <= Decimal::ZERO {
            return Ok(0);
        }
        let out_of_range = || TaxTableError::SalaryOutOfRange {
            salary: gross_salary,
            table_number: self.config.table_number,
            income_year: self.config.income_year,
        };
        let salary = gross_salary
            .round()
            .to_i64()
            .ok_or_else(|| out_of_range())?;
        let in_range = rules
            .first()
            .is_some_and(|first| first.lower_bound <= salary)
            && rules
                .last()
                .is_some_and(|last| last.upper_bound.covers(salary));
        if !in_range {
            return Err(out_of_range());
        }
        for rule in rules {
            if rule.matches(salary) {
                return Ok(rule.tax_for(salary));
            }
        }
        Err(TaxTableError::Inconsistent(salary))
    }

    /// Every band boundary in table order, for chart rendering.
    ///
    /// The open final band contributes twice its lower bound so a plotted
    /// line gets a reasonable right edge; the sentinel never participates in
    /// lookups.
    pub fn bounds(&self) -> Result<impl Iterator<Item = i64>, TaxTableError> {
        Ok(self.rules()?.iter().flat_map(|rule| {
            let upper = match rule.upper_bound {
                Bound::Finite(limit) => limit,
                Bound::Unbounded => 2 * rule.lower_bound,
            };
            [rule.lower_bound, upper]
        }))
    }

    /// Each rule's lower bound, in table order.
    pub fn lower_bounds(&self) -> Result<impl Iterator<Item = i64>, TaxTableError> {
        Ok(self.rules()?.iter().map(|rule| rule.lower_bound))
    }

    /// Each rule's finite upper bound, in table order; the open final band
    /// is omitted entirely.
    pub fn upper_bounds(&self) -> Result<impl Iterator<Item = i64>, TaxTableError> {
        Ok(self.rules()?.iter().filter_map(|rule| rule.upper_bound.finite()))
    }
}
