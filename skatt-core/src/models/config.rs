use serde::{Deserialize, Serialize};

use super::format::LATEST_INCOME_YEAR;

/// Identifies one concrete withholding table: which schedule, which tax
/// column, and which year's dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableConfig {
    /// Withholding schedule number, set by the municipal tax rate.
    pub table_number: u8,
    /// Age at the start of the income year; selects the tax column in
    /// layouts that split by age.
    pub age: u8,
    pub income_year: i32,
}

impl TableConfig {
    pub fn new(table_number: u8, age: u8, income_year: i32) -> Self {
        Self {
            table_number,
            age,
            income_year,
        }
    }
}

impl Default for TableConfig {
    /// Table 30 at age 30 for the latest supported income year.
    fn default() -> Self {
        Self {
            table_number: 30,
            age: 30,
            income_year: LATEST_INCOME_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_targets_the_latest_year() {
        let config = TableConfig::default();

        assert_eq!(config.table_number, 30);
        assert_eq!(config.age, 30);
        assert_eq!(config.income_year, LATEST_INCOME_YEAR);
    }
}
