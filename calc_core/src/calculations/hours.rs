//! # Hours Worked
//!
//! Time worked between a start and end clock time, minus an unpaid break.
//!
//! ## Assumptions
//!
//! - An end time earlier than the start time is an overnight shift and
//!   wraps past midnight (22:00 → 06:00 is 8 hours).
//! - Equal start and end times are a zero-length shift, not 24 hours.
//! - A break longer than the shift is rejected.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// ## JSON Example
///
/// ```json
/// { "start": "09:00:00", "end": "17:00:00", "break_minutes": 60 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoursInput {
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default)]
    pub break_minutes: u32,
}

impl HoursInput {
    /// Parse `HH:MM` clock times
    pub fn parse(start: &str, end: &str, break_minutes: u32) -> CalcResult<Self> {
        Ok(HoursInput {
            start: parse_clock(start, "start")?,
            end: parse_clock(end, "end")?,
            break_minutes,
        })
    }

    /// Shift length before the break, wrapping past midnight
    pub fn shift_minutes(&self) -> i64 {
        let start = minutes_of_day(self.start);
        let end = minutes_of_day(self.end);
        (end - start).rem_euclid(MINUTES_PER_DAY)
    }
}

/// Parse `HH:MM` (or `HH:MM:SS`)
pub fn parse_clock(value: &str, field: &str) -> CalcResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| CalcError::invalid_input(field, value, "Expected a time as HH:MM"))
}

fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursResult {
    pub hours: i64,
    pub minutes: i64,
    pub total_minutes: i64,
    /// Hours as a decimal (e.g. 7.5), handy for timesheets
    pub decimal_hours: f64,
    pub overnight: bool,
}

/// Calculate hours worked.
///
/// ```rust
/// use calc_core::calculations::hours::{calculate, HoursInput};
///
/// let result = calculate(&HoursInput::parse("09:00", "17:00", 60).unwrap()).unwrap();
/// assert_eq!((result.hours, result.minutes), (7, 0));
/// ```
pub fn calculate(input: &HoursInput) -> CalcResult<HoursResult> {
    let shift = input.shift_minutes();
    let worked = shift - i64::from(input.break_minutes);
    if worked < 0 {
        return Err(CalcError::invalid_input(
            "break_minutes",
            input.break_minutes.to_string(),
            format!("Break is longer than the {} minute shift", shift),
        ));
    }

    Ok(HoursResult {
        hours: worked / 60,
        minutes: worked % 60,
        total_minutes: worked,
        decimal_hours: worked as f64 / 60.0,
        overnight: input.end < input.start,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(start: &str, end: &str, break_minutes: u32) -> CalcResult<HoursResult> {
        calculate(&HoursInput::parse(start, end, break_minutes)?)
    }

    #[test]
    fn test_day_shift() {
        let result = hours("09:00", "17:00", 60).unwrap();
        assert_eq!((result.hours, result.minutes), (7, 0));
        assert!(!result.overnight);
    }

    #[test]
    fn test_partial_hours() {
        let result = hours("08:15", "16:45", 30).unwrap();
        assert_eq!((result.hours, result.minutes), (8, 0));
        let result = hours("08:10", "12:00", 0).unwrap();
        assert_eq!((result.hours, result.minutes), (3, 50));
        assert!((result.decimal_hours - 230.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_overnight_shift() {
        let result = hours("22:00", "06:00", 30).unwrap();
        assert_eq!((result.hours, result.minutes), (7, 30));
        assert!(result.overnight);
    }

    #[test]
    fn test_break_longer_than_shift() {
        let err = hours("09:00", "09:30", 45).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_bad_clock_rejected() {
        assert!(HoursInput::parse("25:00", "17:00", 0).is_err());
        assert!(HoursInput::parse("nine", "17:00", 0).is_err());
    }
}
