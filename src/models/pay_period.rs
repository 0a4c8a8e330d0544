//! Payroll month and attendance window models.
//!
//! This module contains the [`PayrollMonth`] type identifying a payroll run
//! and the [`DateWindow`] used to select the attendance records that feed it.

use std::fmt;

use chrono::NaiveDate;

use crate::error::{HrmsError, HrmsResult};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A validated (month, year) pair identifying one payroll run.
///
/// # Example
///
/// ```
/// use hrms_payroll::models::PayrollMonth;
///
/// let period = PayrollMonth::new(3, 2026).unwrap();
/// assert_eq!(period.batch_id(), "PAYROLL-MAR-2026");
/// assert_eq!(period.attendance_window().start(), "2026-03-01");
/// assert_eq!(period.attendance_window().end(), "2026-03-31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayrollMonth {
    // Field order gives (year, month) ordering.
    year: i32,
    month: u32,
}

impl PayrollMonth {
    /// Validates and creates a payroll month.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `month` is outside 1..=12 or `year` is not a
    /// four-digit year.
    pub fn new(month: u32, year: i32) -> HrmsResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(HrmsError::invalid_field(
                "month",
                "must be between 1 and 12",
            ));
        }
        if !(1000..=9999).contains(&year) {
            return Err(HrmsError::invalid_field("year", "must be a four-digit year"));
        }
        Ok(Self { year, month })
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Three-letter upper-case month abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }

    /// Deterministic batch identifier, `PAYROLL-<MON>-<year>`.
    pub fn batch_id(&self) -> String {
        format!("PAYROLL-{}-{}", self.abbreviation(), self.year)
    }

    /// The attendance window for this month.
    pub fn attendance_window(&self) -> DateWindow {
        DateWindow::for_month(self)
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// An inclusive range of ISO-8601 date strings.
///
/// Membership uses lexicographic comparison of `YYYY-MM-DD` strings, which
/// matches chronological order. The month window always ends on day `31`
/// whatever the real month length; no stored date can be an invalid calendar
/// day, so the sentinel selects exactly the days of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    start: String,
    end: String,
}

impl DateWindow {
    /// Window from `YYYY-MM-01` to `YYYY-MM-31`.
    pub fn for_month(period: &PayrollMonth) -> Self {
        Self {
            start: format!("{:04}-{:02}-01", period.year, period.month),
            end: format!("{:04}-{:02}-31", period.year, period.month),
        }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Inclusive upper bound.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Checks whether `date` falls inside the window.
    ///
    /// # Example
    ///
    /// ```
    /// use hrms_payroll::models::PayrollMonth;
    /// use chrono::NaiveDate;
    ///
    /// let window = PayrollMonth::new(2, 2026).unwrap().attendance_window();
    /// assert!(window.contains(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
    /// assert!(!window.contains(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()));
    /// ```
    pub fn contains(&self, date: NaiveDate) -> bool {
        let key = date.format("%Y-%m-%d").to_string();
        key.as_str() >= self.start.as_str() && key.as_str() <= self.end.as_str()
    }
}
