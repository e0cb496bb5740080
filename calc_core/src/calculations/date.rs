//! # Date Calculation
//!
//! Two modes:
//! - **difference**: absolute number of days between two dates
//! - **add days**: move a date forward (or backward, with a negative count)

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Date calculation request.
///
/// ## JSON Example
///
/// ```json
/// { "mode": "difference", "start": "2024-01-01", "end": "2024-03-01" }
/// { "mode": "add_days", "start": "2025-01-20", "days": 30 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateInput {
    Difference { start: NaiveDate, end: NaiveDate },
    AddDays { start: NaiveDate, days: i64 },
}

/// Date calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DateResult {
    Difference {
        days: i64,
        /// Whole weeks in `days`
        weeks: i64,
        /// Days left over after whole weeks
        remaining_days: i64,
    },
    AddDays {
        date: NaiveDate,
        /// e.g. "Monday, January 20, 2025"
        formatted: String,
    },
}

/// Long US-style date, e.g. "Monday, January 20, 2025"
pub fn format_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Run a date calculation.
///
/// ```rust
/// use chrono::NaiveDate;
/// use calc_core::calculations::date::{calculate, DateInput, DateResult};
///
/// let input = DateInput::AddDays {
///     start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     days: 19,
/// };
/// match calculate(&input).unwrap() {
///     DateResult::AddDays { formatted, .. } => assert_eq!(formatted, "Monday, January 20, 2025"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn calculate(input: &DateInput) -> CalcResult<DateResult> {
    match *input {
        DateInput::Difference { start, end } => {
            let days = (end - start).num_days().abs();
            Ok(DateResult::Difference {
                days,
                weeks: days / 7,
                remaining_days: days % 7,
            })
        }
        DateInput::AddDays { start, days } => {
            let magnitude = Days::new(days.unsigned_abs());
            let shifted = if days >= 0 {
                start.checked_add_days(magnitude)
            } else {
                start.checked_sub_days(magnitude)
            };
            let date = shifted.ok_or_else(|| {
                CalcError::invalid_input("days", days.to_string(), "Resulting date is out of range")
            })?;
            Ok(DateResult::AddDays {
                date,
                formatted: format_long(date),
            })
        }
    }
}
