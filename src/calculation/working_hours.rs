//! Working-hours calculation for attendance check-outs.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

const SECONDS_PER_HOUR: i64 = 3600;

/// Calculates the hours between a check-in and a check-out on `date`.
///
/// Both times are combined with the same calendar day, so a check-out
/// earlier than the check-in yields a negative duration. The result is
/// rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use hrms_payroll::calculation::calculate_working_hours;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let hours = calculate_working_hours(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 30, 0).unwrap(),
/// );
/// assert_eq!(hours, Decimal::new(85, 1));
/// ```
pub fn calculate_working_hours(
    date: NaiveDate,
    check_in: NaiveTime,
    check_out: NaiveTime,
) -> Decimal {
    let seconds = (date.and_time(check_out) - date.and_time(check_in)).num_seconds();

    (Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
