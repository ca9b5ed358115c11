//! Fixed-width record decoding for the Skatteverket monthly table files.
//!
//! Every record line uses the same column layout (0-indexed, end exclusive):
//!
//! | Columns | Field |
//! |---------|-------|
//! | 0..2    | format marker, the literal `"30"` |
//! | 2..3    | row kind, `B` (amount) or `%` (percentage) |
//! | 3..5    | table number |
//! | 5..12   | lower salary bound |
//! | 12..19  | upper salary bound, all blank on each table's final row |
//! | 19..24  | tax for individuals under 65 |
//! | 29..34  | tax for individuals 65 and over (dual-column layout only) |

use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Bound, FormatVersion};

const MARKER: Range<usize> = 0..2;
const ROW_KIND: Range<usize> = 2..3;
const TABLE_NUMBER: Range<usize> = 3..5;
const LOWER_BOUND: Range<usize> = 5..12;
const UPPER_BOUND: Range<usize> = 12..19;
const TAX_PRIMARY: Range<usize> = 19..24;
const TAX_SENIOR: Range<usize> = 29..34;

/// How a record encodes its tax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// Flat deduction amount in whole kronor.
    Amount,
    /// Deduction as a percentage of the gross salary.
    Percentage,
}

/// A record line that could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("line does not start with the record marker {expected:?}: got {found:?}")]
    BadMarker {
        expected: &'static str,
        found: String,
    },

    #[error("line too short for the {field} field ({len} columns)")]
    TruncatedLine { field: &'static str, len: usize },

    #[error("unknown row kind indicator {0:?}")]
    UnknownRowKind(String),

    #[error("table number {number} outside the valid range {low}..={high}")]
    TableNumberOutOfRange { number: u8, low: u8, high: u8 },

    #[error("{field} field is not a valid integer: {value:?}")]
    InvalidInteger {
        field: &'static str,
        value: String,
    },

    #[error("percentage {0} outside 0..=100")]
    PercentageOutOfRange(i64),
}

/// One decoded record line, before any age or table-number selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub table_number: u8,
    pub kind: RowKind,
    pub lower_bound: i64,
    pub upper_bound: Bound,
    /// Tax value for individuals under 65 at the start of the income year.
    pub tax_under_65: i64,
    /// Tax value for individuals 65 and over; absent in the legacy
    /// single-column layout.
    pub tax_65_and_over: Option<i64>,
}

/// Decodes one fixed-width line into a [`RawRecord`].
#[derive(Debug, Clone)]
pub struct RecordParser<'a> {
    format: &'a FormatVersion,
}

impl<'a> RecordParser<'a> {
    pub fn new(format: &'a FormatVersion) -> Self {
        Self { format }
    }

    /// Whether the line carries a record at all. Structural lines such as
    /// trailing blanks are expected in the source files and simply skipped
    /// by the caller.
    pub fn is_record(&self, line: &str) -> bool {
        line.starts_with(self.format.marker())
    }

    /// Decode one line, failing on the first malformed field.
    pub fn parse(&self, line: &str) -> Result<RawRecord, FormatError> {
        let marker = field(line, MARKER, "format marker")?;
        if marker != self.format.marker() {
            return Err(FormatError::BadMarker {
                expected: self.format.marker(),
                found: marker.to_string(),
            });
        }

        let kind = match field(line, ROW_KIND, "row kind")? {
            "B" => RowKind::Amount,
            "%" => RowKind::Percentage,
            other => return Err(FormatError::UnknownRowKind(other.to_string())),
        };

        let table_number: u8 = int_field(line, TABLE_NUMBER, "table number")?;
        if !self.format.table_numbers().contains(&table_number) {
            return Err(FormatError::TableNumberOutOfRange {
                number: table_number,
                low: *self.format.table_numbers().start(),
                high: *self.format.table_numbers().end(),
            });
        }

        let lower_bound = int_field(line, LOWER_BOUND, "lower bound")?;
        let upper_bound = if field(line, UPPER_BOUND, "upper bound")?.trim().is_empty() {
            Bound::Unbounded
        } else {
            Bound::Finite(int_field(line, UPPER_BOUND, "upper bound")?)
        };

        let tax_under_65 = tax_field(line, TAX_PRIMARY, "primary tax", kind)?;
        let tax_65_and_over = if self.format.has_senior_column() {
            Some(tax_field(line, TAX_SENIOR, "senior tax", kind)?)
        } else {
            None
        };

        Ok(RawRecord {
            table_number,
            kind,
            lower_bound,
            upper_bound,
            tax_under_65,
            tax_65_and_over,
        })
    }
}

fn field<'a>(line: &'a str, span: Range<usize>, name: &'static str) -> Result<&'a str, FormatError> {
    line.get(span).ok_or(FormatError::TruncatedLine {
        field: name,
        len: line.len(),
    })
}

fn int_field<T: FromStr>(
    line: &str,
    span: Range<usize>,
    name: &'static str,
) -> Result<T, FormatError> {
    let raw = field(line, span, name)?;
    raw.trim().parse().map_err(|_| FormatError::InvalidInteger {
        field: name,
        value: raw.to_string(),
    })
}

fn tax_field(
    line: &str,
    span: Range<usize>,
    name: &'static str,
    kind: RowKind,
) -> Result<i64, FormatError> {
    let value = int_field(line, span, name)?;
    if kind == RowKind::Percentage && !(0..=100).contains(&value) {
        return Err(FormatError::PercentageOutOfRange(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dual() -> RecordParser<'static> {
        RecordParser::new(&FormatVersion::DUAL_COLUMN)
    }

    fn legacy() -> RecordParser<'static> {
        RecordParser::new(&FormatVersion::SINGLE_COLUMN)
    }

    #[test]
    fn parses_an_amount_record() {
        let record = dual()
            .parse("30B3000016010001800001170011000104")
            .expect("valid amount record");

        assert_eq!(
            record,
            RawRecord {
                table_number: 30,
                kind: RowKind::Amount,
                lower_bound: 1601,
                upper_bound: Bound::Finite(1800),
                tax_under_65: 117,
                tax_65_and_over: Some(104),
            }
        );
    }

    #[test]
    fn blank_upper_bound_means_unbounded() {
        let record = dual()
            .parse("30%300150001       000450004100037")
            .expect("valid final record");

        assert_eq!(record.kind, RowKind::Percentage);
        assert_eq!(record.lower_bound, 150001);
        assert_eq!(record.upper_bound, Bound::Unbounded);
        assert_eq!(record.tax_under_65, 45);
        assert_eq!(record.tax_65_and_over, Some(37));
    }

    #[test]
    fn legacy_layout_has_no_senior_column() {
        let record = legacy()
            .parse("30B300001601000180000117")
            .expect("valid legacy record");

        assert_eq!(record.tax_under_65, 117);
        assert_eq!(record.tax_65_and_over, None);
    }

    #[test]
    fn rejects_a_wrong_marker() {
        let err = dual()
            .parse("29B3000016010001800001170011000104")
            .expect_err("marker must be 30");

        assert_eq!(
            err,
            FormatError::BadMarker {
                expected: "30",
                found: "29".to_string(),
            }
        );
    }

    #[test]
    fn rejects_an_unknown_row_kind() {
        let err = dual()
            .parse("30X3000016010001800001170011000104")
            .expect_err("row kind must be B or %");

        assert_eq!(err, FormatError::UnknownRowKind("X".to_string()));
    }

    #[test]
    fn rejects_a_table_number_outside_the_layout_range() {
        let err = dual()
            .parse("30B4300016010001800001170011000104")
            .expect_err("43 is past the dual-column range");

        assert_eq!(
            err,
            FormatError::TableNumberOutOfRange {
                number: 43,
                low: 29,
                high: 42,
            }
        );
    }

    #[test]
    fn the_legacy_range_is_narrower() {
        let err = legacy()
            .parse("30B410001601000180000117")
            .expect_err("41 is past the single-column range");

        assert_eq!(
            err,
            FormatError::TableNumberOutOfRange {
                number: 41,
                low: 29,
                high: 40,
            }
        );
    }

    #[test]
    fn rejects_a_percentage_above_100() {
        let err = dual()
            .parse("30%300150001       001010004100037")
            .expect_err("101 percent is invalid");

        assert_eq!(err, FormatError::PercentageOutOfRange(101));
    }

    #[test]
    fn an_amount_above_100_is_fine() {
        let record = dual()
            .parse("30B3000016010001800001170011000104")
            .expect("amounts are not percentages");

        assert_eq!(record.tax_under_65, 117);
    }

    #[test]
    fn rejects_a_truncated_line() {
        let err = dual().parse("30B30").expect_err("line is cut short");

        assert_eq!(
            err,
            FormatError::TruncatedLine {
                field: "lower bound",
                len: 5,
            }
        );
    }

    #[test]
    fn rejects_garbage_in_an_integer_field() {
        let err = dual()
            .parse("30Bxx0001601000180000117001100104x")
            .expect_err("table number is not numeric");

        assert_eq!(
            err,
            FormatError::InvalidInteger {
                field: "table number",
                value: "xx".to_string(),
            }
        );
    }

    #[test]
    fn is_record_spots_structural_lines() {
        let parser = dual();

        assert!(parser.is_record("30B3000016010001800001170011000104"));
        assert!(!parser.is_record(""));
        assert!(!parser.is_record("Tabell 30, inkomstår 2021"));
    }
}
