//! Contiguous span of year columns.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Years that name a column in the WDI export.
const YEAR_SPAN: RangeInclusive<i32> = 1000..=9999;

/// Inclusive range of years selected from the source table.
///
/// Year columns in the WDI export are named by the 4-digit year, so the
/// range doubles as the list of column names to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            start: 2012,
            end: 2020,
        }
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Both ends must be four-digit years, `start` no later than `end`.
    pub fn validate(&self) -> Result<()> {
        let four_digit = YEAR_SPAN.contains(&self.start) && YEAR_SPAN.contains(&self.end);
        if self.start > self.end || !four_digit {
            return Err(ModelError::InvalidYearRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of years in the range.
    pub fn len(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            usize::try_from(i64::from(self.end) - i64::from(self.start) + 1).unwrap_or(usize::MAX)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        (self.start..=self.end).collect()
    }

    /// Source column names for the years, in ascending order.
    pub fn column_names(&self) -> Vec<String> {
        self.years().iter().map(i32::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_spans_nine_years() {
        let range = YearRange::default();
        assert_eq!(range.len(), 9);
        assert_eq!(range.years().first(), Some(&2012));
        assert_eq!(range.years().last(), Some(&2020));
    }

    #[test]
    fn column_names_are_four_digit_years() {
        let range = YearRange::new(2018, 2020).unwrap();
        insta::assert_debug_snapshot!(range.column_names(), @r#"
        [
            "2018",
            "2019",
            "2020",
        ]
        "#);
    }

    #[test]
    fn rejects_reversed_range() {
        let result = YearRange::new(2020, 2012);
        assert!(matches!(
            result,
            Err(ModelError::InvalidYearRange {
                start: 2020,
                end: 2012
            })
        ));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = YearRange::default();
        assert!(range.contains(2012));
        assert!(range.contains(2020));
        assert!(!range.contains(2021));
    }

    #[test]
    fn rejects_years_outside_four_digits() {
        assert!(YearRange::new(i32::MIN, i32::MAX).is_err());
        assert!(YearRange::new(999, 2020).is_err());
        assert!(YearRange::new(2012, 10_000).is_err());
        assert_eq!(YearRange::new(1000, 9999).unwrap().len(), 9000);
    }

    #[test]
    fn extreme_unvalidated_range_has_no_overflow() {
        let range = YearRange {
            start: i32::MIN,
            end: i32::MAX,
        };
        assert_eq!(range.len(), 1usize << 32);
    }
}
