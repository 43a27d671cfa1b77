//! Wall-clock time arithmetic.
//!
//! Shifts and punches record times of day as "HH:MM" strings with no date
//! attached. Every aggregator derives hours through this module, which owns
//! the single overnight policy: an end time strictly before the start time
//! is taken to cross midnight. An end time exactly equal to the start yields
//! zero hours, not twenty-four.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};

/// Minutes in a day, for normalizing intervals that cross midnight.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// What a bulk aggregation should do when a time string fails to parse.
///
/// The policy is an explicit parameter of every aggregation call site rather
/// than an implicit per-function choice: hour-list style rollups skip the
/// offending record, report-style rollups abort the whole calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Skip the offending record and continue accumulating.
    Skip,
    /// Abort the calculation with [`PayrollError::MalformedTime`].
    Abort,
}

/// Parses a strict "HH:MM" wall-clock string.
///
/// # Errors
///
/// Returns [`PayrollError::MalformedTime`] when the string is not a valid
/// 24-hour "HH:MM" time.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::parse_clock;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_clock("09:30").unwrap(),
///     NaiveTime::from_hms_opt(9, 30, 0).unwrap()
/// );
/// assert!(parse_clock("25:99").is_err());
/// assert!(parse_clock("9am").is_err());
/// ```
pub fn parse_clock(value: &str) -> PayrollResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| PayrollError::MalformedTime {
        value: value.to_string(),
    })
}

/// Hours between two times of day, normalizing midnight crossings.
///
/// If `end` is strictly before `start` the interval is assumed to cross
/// midnight and 24 hours are added before subtracting. Equal times yield
/// zero. The result is always non-negative.
pub fn duration_between(start: NaiveTime, end: NaiveTime) -> Decimal {
    let mut minutes = end.signed_duration_since(start).num_minutes();
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Hours between two "HH:MM" strings, normalizing midnight crossings.
///
/// # Errors
///
/// Returns [`PayrollError::MalformedTime`] when either string fails to parse.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::duration_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(duration_hours("09:00", "17:00").unwrap(), Decimal::new(8, 0));
/// // Crosses midnight.
/// assert_eq!(duration_hours("23:00", "07:00").unwrap(), Decimal::new(8, 0));
/// // Equal times are an empty interval, not a full day.
/// assert_eq!(duration_hours("09:00", "09:00").unwrap(), Decimal::ZERO);
/// ```
pub fn duration_hours(start: &str, end: &str) -> PayrollResult<Decimal> {
    Ok(duration_between(parse_clock(start)?, parse_clock(end)?))
}

/// Sums `duration_hours` over (start, end) string pairs under a parse policy.
///
/// With [`ParsePolicy::Skip`] malformed pairs contribute nothing; with
/// [`ParsePolicy::Abort`] the first malformed pair fails the whole sum.
pub fn sum_durations<'a, I>(pairs: I, policy: ParsePolicy) -> PayrollResult<Decimal>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut total = Decimal::ZERO;
    for (start, end) in pairs {
        match duration_hours(start, end) {
            Ok(hours) => total += hours,
            Err(_) if policy == ParsePolicy::Skip => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(total)
}
