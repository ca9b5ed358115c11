use std::ops::RangeInclusive;

/// Income years with a published dataset revision.
pub const SUPPORTED_INCOME_YEARS: [i32; 3] = [2021, 2022, 2023];

/// Default income year for new table configurations.
pub const LATEST_INCOME_YEAR: i32 = 2023;

/// One revision of the fixed-width file layout.
///
/// The column offsets are shared between revisions; what changed over time is
/// the set of published table numbers and whether the layout carries a
/// separate tax column for individuals aged 65 and over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatVersion {
    marker: &'static str,
    table_numbers: RangeInclusive<u8>,
    senior_column: bool,
}

impl FormatVersion {
    /// Current layout: separate under-65 / 65-and-over tax columns,
    /// tables 29 through 42.
    pub const DUAL_COLUMN: FormatVersion = FormatVersion {
        marker: "30",
        table_numbers: 29..=42,
        senior_column: true,
    };

    /// Legacy layout with a single tax column regardless of age,
    /// tables 29 through 40.
    pub const SINGLE_COLUMN: FormatVersion = FormatVersion {
        marker: "30",
        table_numbers: 29..=40,
        senior_column: false,
    };

    /// The layout active for an income year, or `None` when the year has no
    /// published dataset.
    pub fn for_income_year(income_year: i32) -> Option<&'static FormatVersion> {
        if SUPPORTED_INCOME_YEARS.contains(&income_year) {
            Some(&Self::DUAL_COLUMN)
        } else {
            None
        }
    }

    /// Two-character literal every record line starts with.
    pub fn marker(&self) -> &'static str {
        self.marker
    }

    /// Table numbers published in this revision.
    pub fn table_numbers(&self) -> &RangeInclusive<u8> {
        &self.table_numbers
    }

    /// Whether the layout has the separate 65-and-over tax column.
    pub fn has_senior_column(&self) -> bool {
        self.senior_column
    }
}
