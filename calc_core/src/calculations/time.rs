//! # Time Duration Calculation
//!
//! Adds or subtracts two durations given in hours and minutes. Minutes may
//! exceed 59 on input; the result is normalized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A duration of hours and minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoursMinutes {
    #[serde(default)]
    pub hours: i64,
    #[serde(default)]
    pub minutes: i64,
}

impl HoursMinutes {
    pub fn new(hours: i64, minutes: i64) -> Self {
        HoursMinutes { hours, minutes }
    }

    /// `None` when the duration does not fit in an `i64` of minutes
    pub fn total_minutes(&self) -> Option<i64> {
        self.hours.checked_mul(60)?.checked_add(self.minutes)
    }

    fn label(&self) -> String {
        format!("{}h {}m", self.hours, self.minutes)
    }

    /// Total minutes of a non-negative duration
    fn checked_minutes(&self, field: &str) -> CalcResult<i64> {
        if self.hours < 0 || self.minutes < 0 {
            return Err(CalcError::invalid_input(
                field,
                self.label(),
                "Hours and minutes must not be negative",
            ));
        }
        self.total_minutes()
            .ok_or_else(|| CalcError::invalid_input(field, self.label(), "Duration is too large"))
    }
}

/// Parses `H:MM` (e.g. `2:45`) or a bare number of hours
impl FromStr for HoursMinutes {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || CalcError::invalid_input("duration", text, "Expected hours and minutes as H:MM");
        let (hours, minutes) = match text.split_once(':') {
            Some((h, m)) => (h.trim().parse().map_err(|_| invalid())?, m.trim().parse().map_err(|_| invalid())?),
            None => (text.parse().map_err(|_| invalid())?, 0),
        };
        Ok(HoursMinutes { hours, minutes })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOperation {
    #[default]
    Add,
    Subtract,
}

/// ## JSON Example
///
/// ```json
/// { "first": { "hours": 2, "minutes": 45 }, "operation": "add", "second": { "hours": 1, "minutes": 30 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeInput {
    pub first: HoursMinutes,
    #[serde(default)]
    pub operation: TimeOperation,
    pub second: HoursMinutes,
}

/// Signed, normalized duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeResult {
    pub negative: bool,
    pub hours: i64,
    /// Always 0-59
    pub minutes: i64,
    pub total_minutes: i64,
}

impl fmt::Display for TimeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{}{}h {}m", sign, self.hours, self.minutes)
    }
}

/// Split signed minutes into a normalized result
pub fn from_minutes(total_minutes: i64) -> TimeResult {
    let magnitude = total_minutes.abs();
    TimeResult {
        negative: total_minutes < 0,
        hours: magnitude / 60,
        minutes: magnitude % 60,
        total_minutes,
    }
}

/// Add or subtract two durations.
///
/// ```rust
/// use calc_core::calculations::time::{calculate, HoursMinutes, TimeInput, TimeOperation};
///
/// let result = calculate(&TimeInput {
///     first: HoursMinutes::new(1, 0),
///     operation: TimeOperation::Subtract,
///     second: HoursMinutes::new(2, 30),
/// }).unwrap();
/// assert_eq!(result.to_string(), "-1h 30m");
/// ```
pub fn calculate(input: &TimeInput) -> CalcResult<TimeResult> {
    let a = input.first.checked_minutes("first")?;
    let b = input.second.checked_minutes("second")?;

    let total = match input.operation {
        TimeOperation::Add => a.checked_add(b),
        TimeOperation::Subtract => a.checked_sub(b),
    }
    .ok_or_else(|| CalcError::invalid_input("second", input.second.label(), "Duration is too large"))?;
    Ok(from_minutes(total))
}
