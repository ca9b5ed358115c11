use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper salary bound of a table row.
///
/// The last row of every table is open ended, marked in the source data by an
/// all-blank upper bound field. A tagged variant keeps the comparison logic
/// in integers instead of leaning on a float infinity sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    Finite(i64),
    Unbounded,
}

impl Bound {
    /// Whether a salary falls at or below this bound.
    pub fn covers(&self, salary: i64) -> bool {
        match self {
            Bound::Finite(limit) => salary <= *limit,
            Bound::Unbounded => true,
        }
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<i64> {
        match self {
            Bound::Finite(limit) => Some(*limit),
            Bound::Unbounded => None,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(limit) => write!(f, "{limit}"),
            Bound::Unbounded => f.write_str("unbounded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finite_bound_covers_up_to_its_limit() {
        assert!(Bound::Finite(1800).covers(1800));
        assert!(Bound::Finite(1800).covers(0));
        assert!(!Bound::Finite(1800).covers(1801));
    }

    #[test]
    fn unbounded_covers_everything() {
        assert!(Bound::Unbounded.covers(i64::MAX));
        assert!(Bound::Unbounded.covers(0));
    }

    #[test]
    fn finite_accessor() {
        assert_eq!(Bound::Finite(1800).finite(), Some(1800));
        assert_eq!(Bound::Unbounded.finite(), None);
    }
}
