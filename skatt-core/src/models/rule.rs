use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::Bound;

/// How one table row computes its deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deduction {
    /// Fixed deduction in whole kronor, independent of the salary.
    Amount(i64),
    /// Deduction as a percentage of the gross salary.
    Percentage(u8),
}

/// One entry in a table's ordered rule list.
///
/// Immutable once built; owned by the [`TaxTable`](crate::table::TaxTable)
/// that assembled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    pub lower_bound: i64,
    pub upper_bound: Bound,
    pub deduction: Deduction,
}

impl TaxRule {
    /// Whether the salary falls inside this rule's inclusive band.
    pub fn matches(&self, salary: i64) -> bool {
        self.lower_bound <= salary && self.upper_bound.covers(salary)
    }

    /// The deduction for a salary inside this band.
    pub fn tax_for(&self, salary: i64) -> i64 {
        match self.deduction {
            Deduction::Amount(amount) => amount,
            Deduction::Percentage(rate) => percentage_of(rate, salary),
        }
    }
}

/// `rate` percent of `salary`, rounded to the nearest whole krona with ties
/// going to the even value, matching the published tables.
fn percentage_of(rate: u8, salary: i64) -> i64 {
    let product = i128::from(rate) * i128::from(salary);
    let quotient = product.div_euclid(100);
    let remainder = product.rem_euclid(100);
    let rounded = match remainder.cmp(&50) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };
    // rate is at most 100, so the result never exceeds the salary
    rounded as i64
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn amount_rule() -> TaxRule {
        TaxRule {
            lower_bound: 1601,
            upper_bound: Bound::Finite(1800),
            deduction: Deduction::Amount(117),
        }
    }

    fn percentage_rule() -> TaxRule {
        TaxRule {
            lower_bound: 80001,
            upper_bound: Bound::Unbounded,
            deduction: Deduction::Percentage(36),
        }
    }

    #[test]
    fn matches_respects_inclusive_band_edges() {
        let rule = amount_rule();

        assert!(rule.matches(1601));
        assert!(rule.matches(1800));
        assert!(!rule.matches(1600));
        assert!(!rule.matches(1801));
    }

    #[test]
    fn amount_rule_ignores_the_salary() {
        let rule = amount_rule();

        assert_eq!(rule.tax_for(1601), 117);
        assert_eq!(rule.tax_for(1800), 117);
    }

    #[test]
    fn percentage_rule_scales_with_the_salary() {
        let rule = percentage_rule();

        // 36% of 80001 is 28800.36
        assert_eq!(rule.tax_for(80001), 28800);
        assert_eq!(rule.tax_for(100000), 36000);
    }

    #[test]
    fn percentage_rounds_half_to_even() {
        // 50% of 3 is 1.5 and rounds up to the even 2
        assert_eq!(percentage_of(50, 3), 2);
        // 50% of 5 is 2.5 and rounds down to the even 2
        assert_eq!(percentage_of(50, 5), 2);
        assert_eq!(percentage_of(50, 7), 4);
    }

    #[test]
    fn percentage_handles_the_extremes() {
        assert_eq!(percentage_of(0, 50000), 0);
        assert_eq!(percentage_of(100, 50000), 50000);
        assert_eq!(percentage_of(36, 0), 0);
    }
}
