//! Reconciliation period representation
//!
//! Budgets are either monthly or yearly; a reconciliation query targets one
//! calendar month (`YYYY-MM`) or one calendar year (`YYYY`).

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The cadence a budget limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A reconciliation window
///
/// Months are zero-indexed (`month0`, 0 = January) to line up with
/// `chrono::Datelike::month0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReconcilePeriod {
    Month { year: i32, month0: u32 },
    Year { year: i32 },
}

impl ReconcilePeriod {
    /// Create a monthly period from a zero-indexed month
    pub fn month(year: i32, month0: u32) -> Self {
        Self::Month { year, month0 }
    }

    /// Create a yearly period
    pub fn year(year: i32) -> Self {
        Self::Year { year }
    }

    /// The monthly period containing a date
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// The budget period type this window reconciles
    pub fn period_type(&self) -> PeriodType {
        match self {
            Self::Month { .. } => PeriodType::Monthly,
            Self::Year { .. } => PeriodType::Yearly,
        }
    }

    /// Period identifier, `YYYY-MM` (one-indexed month) or `YYYY`
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Check if a calendar date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month0 } => date.year() == *year && date.month0() == *month0,
            Self::Year { year } => date.year() == *year,
        }
    }

    /// First day of the period
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Month { year, month0 } => NaiveDate::from_ymd_opt(*year, month0 + 1, 1),
            Self::Year { year } => NaiveDate::from_ymd_opt(*year, 1, 1),
        }
    }

    /// Last day of the period (inclusive)
    pub fn end_date(&self) -> Option<NaiveDate> {
        let next_start = self.next().start_date()?;
        Some(next_start - Duration::days(1))
    }

    /// The following period of the same kind
    pub fn next(&self) -> Self {
        match self {
            Self::Month { year, month0 } if *month0 >= 11 => Self::Month {
                year: year + 1,
                month0: 0,
            },
            Self::Month { year, month0 } => Self::Month {
                year: *year,
                month0: month0 + 1,
            },
            Self::Year { year } => Self::Year { year: year + 1 },
        }
    }

    /// The preceding period of the same kind
    pub fn prev(&self) -> Self {
        match self {
            Self::Month { year, month0: 0 } => Self::Month {
                year: year - 1,
                month0: 11,
            },
            Self::Month { year, month0 } => Self::Month {
                year: *year,
                month0: month0 - 1,
            },
            Self::Year { year } => Self::Year { year: year - 1 },
        }
    }

    /// The `count` months ending with the month containing `date`, oldest first
    pub fn trailing_months(date: NaiveDate, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut current = Self::month_of(date);
        for _ in 0..count {
            months.push(current);
            current = current.prev();
        }
        months.reverse();
        months
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Monthly: "2025-01" (one-indexed month)
    /// - Yearly: "2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let invalid = || PeriodParseError::InvalidFormat(s.to_string());

        match s.split_once('-') {
            Some((year, month)) => {
                let year: i32 = year.parse().map_err(|_| invalid())?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(PeriodParseError::InvalidMonth(month));
                }
                Ok(Self::Month {
                    year,
                    month0: month - 1,
                })
            }
            None => {
                let year: i32 = s.parse().map_err(|_| invalid())?;
                Ok(Self::Year { year })
            }
        }
    }
}

impl fmt::Display for ReconcilePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month0 } => write!(f, "{:04}-{:02}", year, month0 + 1),
            Self::Year { year } => write!(f, "{:04}", year),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
